use crate::{
    config::NodeConfig,
    consensus::{ActiveElections, ElectionScheduler, ElectionSchedulerExt},
    stats::{DetailType, StatType, Stats},
};
use nanosched_core::{utils::ContainerInfo, Block, BlockHash, SavedBlock};
use nanosched_ledger::{BlockStatus, Ledger, LedgerReader};
use std::sync::Arc;
use tracing::{debug, info};

/// Wires the ledger, the elections container and the election scheduler together
pub struct Node {
    pub config: NodeConfig,
    pub ledger: Arc<Ledger>,
    pub stats: Arc<Stats>,
    pub active: Arc<ActiveElections>,
    pub election_scheduler: Arc<ElectionScheduler>,
}

impl Node {
    pub fn new(config: NodeConfig, ledger: Arc<Ledger>) -> Self {
        let stats = Arc::new(Stats::new());
        let active = Arc::new(ActiveElections::new(
            config.active_elections.clone(),
            Arc::clone(&stats),
        ));
        let election_scheduler = Arc::new(ElectionScheduler::new(
            config.election_scheduler.clone(),
            Arc::clone(&ledger) as Arc<dyn LedgerReader>,
            Arc::clone(&active),
            Arc::clone(&stats),
        ));
        Self {
            config,
            ledger,
            stats,
            active,
            election_scheduler,
        }
    }

    pub fn start(&self) {
        self.election_scheduler.start();
        info!(
            blocks = self.ledger.block_count(),
            cemented = self.ledger.cemented_count(),
            "Node started"
        );
    }

    pub fn stop(&self) {
        info!("Node is stopping...");
        self.election_scheduler.stop();
        debug!("Node stopped");
    }

    /// Appends the block to the ledger
    pub fn process(&self, block: Block) -> Result<SavedBlock, BlockStatus> {
        match self.ledger.process(block) {
            Ok(saved) => {
                self.stats.inc(StatType::Ledger, DetailType::Processed);
                Ok(saved)
            }
            Err(status) => {
                self.stats.inc(StatType::Ledger, DetailType::Rejected);
                debug!(status = status.as_str(), "block rejected");
                Err(status)
            }
        }
    }

    /// Appends the block to the ledger and schedules an election for its account
    pub fn process_active(&self, block: Block) -> Result<SavedBlock, BlockStatus> {
        let saved = self.process(block)?;
        self.election_scheduler.activate(&saved.account());
        Ok(saved)
    }

    /// Cements the block and its dependencies, confirms their elections and
    /// activates the blocks that became eligible
    pub fn confirm(&self, hash: &BlockHash) -> Vec<SavedBlock> {
        let cemented = self.ledger.confirm(*hash);
        self.stats.add(
            StatType::Ledger,
            DetailType::Cemented,
            cemented.len() as u64,
        );

        for block in &cemented {
            self.active.force_confirm(&block.qualified_root());
        }

        let tx = self.ledger.tx_begin_read();
        for block in &cemented {
            self.election_scheduler
                .activate_successors(tx.as_ref(), block);
        }
        cemented
    }

    pub fn container_info(&self) -> ContainerInfo {
        ContainerInfo::builder()
            .node("active", self.active.container_info())
            .node("election_scheduler", self.election_scheduler.container_info())
            .finish()
    }
}
