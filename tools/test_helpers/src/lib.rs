use nanosched_core::{Account, Amount, Block, BlockHash, UnsavedBlockLatticeBuilder};
use nanosched_ledger::{Ledger, LedgerReader};
use nanosched_node::{
    config::NodeConfig,
    consensus::{Election, ElectionBehavior},
    Node,
};
use std::{
    sync::{Arc, OnceLock},
    thread::sleep,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

pub struct System {
    nodes: Vec<Arc<Node>>,
}

impl System {
    pub fn new() -> Self {
        init_tracing();
        Self { nodes: Vec::new() }
    }

    pub fn default_config() -> NodeConfig {
        NodeConfig::default()
    }

    pub fn build_node<'a>(&'a mut self) -> NodeBuilder<'a> {
        NodeBuilder {
            system: self,
            config: None,
            ledger: None,
        }
    }

    pub fn make_node(&mut self) -> Arc<Node> {
        self.build_node().finish()
    }

    fn make_node_with(&mut self, config: NodeConfig, ledger: Arc<Ledger>) -> Arc<Node> {
        let node = Arc::new(Node::new(config, ledger));
        node.start();
        self.nodes.push(node.clone());
        node
    }

    fn stop(&mut self) {
        for node in &self.nodes {
            node.stop();
        }
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for System {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct NodeBuilder<'a> {
    system: &'a mut System,
    config: Option<NodeConfig>,
    ledger: Option<Arc<Ledger>>,
}

impl<'a> NodeBuilder<'a> {
    pub fn config(mut self, cfg: NodeConfig) -> Self {
        self.config = Some(cfg);
        self
    }

    pub fn ledger(mut self, ledger: Arc<Ledger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn finish(self) -> Arc<Node> {
        let config = self.config.unwrap_or_else(System::default_config);
        let ledger = self.ledger.unwrap_or_else(|| Arc::new(Ledger::new()));
        self.system.make_node_with(config, ledger)
    }
}

pub fn assert_never(duration: Duration, mut check: impl FnMut() -> bool) {
    let start = Instant::now();
    while start.elapsed() < duration {
        if check() {
            panic!("never check failed");
        }
        sleep(Duration::from_millis(50));
    }
}

pub fn assert_timely<F>(timeout: Duration, check: F)
where
    F: FnMut() -> bool,
{
    assert_timely_msg(timeout, check, "timeout");
}

pub fn assert_timely_msg<F>(timeout: Duration, mut check: F, error_message: &str)
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return;
        }
        sleep(Duration::from_millis(50));
    }
    panic!("{}", error_message);
}

pub fn assert_timely_eq<T, F>(timeout: Duration, mut check: F, expected: T)
where
    T: PartialEq + std::fmt::Debug + Clone,
    F: FnMut() -> T,
{
    let start = Instant::now();
    let mut actual = expected.clone();
    while start.elapsed() < timeout {
        actual = check();
        if actual == expected {
            return;
        }
        sleep(Duration::from_millis(50));
    }
    panic!("timeout. expected: {expected:?}, actual: {actual:?}");
}

pub fn assert_always_eq<T, F>(time: Duration, mut condition: F, expected: T)
where
    T: PartialEq + std::fmt::Debug,
    F: FnMut() -> T,
{
    let start = Instant::now();
    while start.elapsed() < time {
        assert_eq!(condition(), expected);
        sleep(Duration::from_millis(50));
    }
}

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

pub fn init_tracing() {
    TRACING_INITIALIZED.get_or_init(|| {
        let dirs = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or(String::from("off"));
        let filter = EnvFilter::builder().parse_lossy(dirs);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_ansi(true)
            .init();
    });
}

/// Starts a manual election for a block that is already in the ledger
pub fn start_election(node: &Node, hash: &BlockHash) -> Arc<Election> {
    let tx = node.ledger.read_txn();
    let block = node.ledger.get_block(&tx, hash).expect("block not in ledger");
    node.election_scheduler
        .insert(Arc::new(block.clone()), None, ElectionBehavior::Manual, None);
    assert_timely_msg(
        Duration::from_secs(5),
        || node.active.election(&block.qualified_root()).is_some(),
        "election not active",
    );
    node.active.election(&block.qualified_root()).unwrap()
}

/// Creates `count` accounts, each with a send from genesis and the
/// matching open block. Nothing is processed.
pub fn setup_independent_accounts(count: usize) -> Vec<(Block, Block)> {
    let mut lattice = UnsavedBlockLatticeBuilder::new();
    (0..count)
        .map(|i| {
            let account = Account::from(1000 + i as u64);
            let send = lattice.genesis().send(account, Amount::raw(1000));
            let open = lattice.account(account).receive(&send);
            (send, open)
        })
        .collect()
}
