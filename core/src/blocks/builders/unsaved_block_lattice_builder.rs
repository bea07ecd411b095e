use crate::{
    Account, Amount, Block, BlockHash, Link, PendingInfo, PendingKey, PublicKey,
    DEV_GENESIS_ACCOUNT, DEV_GENESIS_BLOCK,
};
use std::collections::HashMap;

/// Creates valid, not yet processed blocks for any number of account chains.
/// The builder keeps track of frontiers and pending receives, so the produced
/// blocks can be processed by a ledger in creation order.
pub struct UnsavedBlockLatticeBuilder {
    accounts: HashMap<Account, Frontier>,
    pending_receives: HashMap<PendingKey, PendingInfo>,
}

#[derive(Clone)]
struct Frontier {
    hash: BlockHash,
    representative: PublicKey,
    balance: Amount,
}

impl UnsavedBlockLatticeBuilder {
    pub fn new() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            *DEV_GENESIS_ACCOUNT,
            Frontier {
                hash: DEV_GENESIS_BLOCK.hash(),
                representative: DEV_GENESIS_BLOCK.representative(),
                balance: Amount::MAX,
            },
        );
        Self {
            accounts,
            pending_receives: Default::default(),
        }
    }

    pub fn genesis(&mut self) -> UnsavedAccountChainBuilder {
        self.account(*DEV_GENESIS_ACCOUNT)
    }

    pub fn account(&mut self, account: impl Into<Account>) -> UnsavedAccountChainBuilder {
        UnsavedAccountChainBuilder {
            lattice: self,
            account: account.into(),
        }
    }
}

impl Default for UnsavedBlockLatticeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct UnsavedAccountChainBuilder<'a> {
    lattice: &'a mut UnsavedBlockLatticeBuilder,
    account: Account,
}

impl<'a> UnsavedAccountChainBuilder<'a> {
    pub fn send_all_except(
        &mut self,
        destination: impl Into<Account>,
        keep: impl Into<Amount>,
    ) -> Block {
        let frontier = self.get_frontier();
        self.send(destination, frontier.balance - keep.into())
    }

    pub fn send(&mut self, destination: impl Into<Account>, amount: impl Into<Amount>) -> Block {
        let destination = destination.into();
        let frontier = self.get_frontier();
        let amount = amount.into();
        let new_balance = frontier.balance - amount;

        let send = Block::builder()
            .account(self.account)
            .previous(frontier.hash)
            .representative(frontier.representative)
            .balance(new_balance)
            .link(destination)
            .build();

        self.set_new_frontier(Frontier {
            hash: send.hash(),
            representative: frontier.representative,
            balance: new_balance,
        });

        self.lattice.pending_receives.insert(
            PendingKey::new(destination, send.hash()),
            PendingInfo::new(self.account, amount),
        );

        send
    }

    pub fn receive(&mut self, corresponding_send: &Block) -> Block {
        assert_eq!(Account::from(corresponding_send.link()), self.account);
        let amount = self
            .lattice
            .pending_receives
            .remove(&PendingKey::new(self.account, corresponding_send.hash()))
            .expect("no pending receive found")
            .amount;

        let frontier = self.get_frontier_or_empty();
        let new_balance = frontier.balance + amount;

        let receive = Block::builder()
            .account(self.account)
            .previous(frontier.hash)
            .representative(frontier.representative)
            .balance(new_balance)
            .link(corresponding_send.hash())
            .build();

        self.set_new_frontier(Frontier {
            hash: receive.hash(),
            representative: frontier.representative,
            balance: new_balance,
        });

        receive
    }

    pub fn change(&mut self, new_representative: impl Into<PublicKey>) -> Block {
        let frontier = self.get_frontier();
        let new_representative = new_representative.into();
        let change = Block::builder()
            .account(self.account)
            .previous(frontier.hash)
            .representative(new_representative)
            .balance(frontier.balance)
            .link(Link::zero())
            .build();

        self.set_new_frontier(Frontier {
            hash: change.hash(),
            representative: new_representative,
            balance: frontier.balance,
        });

        change
    }

    fn get_frontier(&self) -> Frontier {
        self.lattice
            .accounts
            .get(&self.account)
            .cloned()
            .expect("account chain not opened")
    }

    fn get_frontier_or_empty(&self) -> Frontier {
        self.lattice
            .accounts
            .get(&self.account)
            .cloned()
            .unwrap_or(Frontier {
                hash: BlockHash::zero(),
                representative: self.account.into(),
                balance: Amount::zero(),
            })
    }

    fn set_new_frontier(&mut self, new_frontier: Frontier) {
        self.lattice.accounts.insert(self.account, new_frontier);
    }
}
