use crate::{Account, Amount, BlockHash, BlockHashBuilder, Link, PublicKey, QualifiedRoot, Root};

/// A block in an account chain. Its meaning (send, receive, change) only
/// becomes known once the ledger compares the balance with the previous block.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    account: Account,
    previous: BlockHash,
    representative: PublicKey,
    balance: Amount,
    link: Link,
    hash: BlockHash,
}

impl Block {
    pub fn new(
        account: Account,
        previous: BlockHash,
        representative: PublicKey,
        balance: Amount,
        link: Link,
    ) -> Self {
        let hash = BlockHashBuilder::new()
            .update(account.as_bytes())
            .update(previous.as_bytes())
            .update(representative.as_bytes())
            .update(balance.to_be_bytes())
            .update(link.as_bytes())
            .build();
        Self {
            account,
            previous,
            representative,
            balance,
            link,
            hash,
        }
    }

    pub fn builder() -> StateBlockBuilder {
        StateBlockBuilder::new()
    }

    pub fn new_test_instance() -> Self {
        Self::builder()
            .account(Account::from(1))
            .previous(BlockHash::from(2))
            .representative(PublicKey::from(3))
            .balance(Amount::raw(420))
            .link(Link::from(4))
            .build()
    }

    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn previous(&self) -> BlockHash {
        self.previous
    }

    pub fn representative(&self) -> PublicKey {
        self.representative
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn link(&self) -> Link {
        self.link
    }

    pub fn is_open(&self) -> bool {
        self.previous.is_zero()
    }

    /// The previous block, or the account for open blocks
    pub fn root(&self) -> Root {
        if self.previous.is_zero() {
            self.account.into()
        } else {
            self.previous.into()
        }
    }

    pub fn qualified_root(&self) -> QualifiedRoot {
        QualifiedRoot::new(self.root(), self.previous)
    }
}

pub struct StateBlockBuilder {
    account: Account,
    previous: BlockHash,
    representative: PublicKey,
    balance: Amount,
    link: Link,
}

impl StateBlockBuilder {
    pub fn new() -> Self {
        Self {
            account: Account::zero(),
            previous: BlockHash::zero(),
            representative: PublicKey::zero(),
            balance: Amount::zero(),
            link: Link::zero(),
        }
    }

    pub fn account(mut self, account: impl Into<Account>) -> Self {
        self.account = account.into();
        self
    }

    pub fn previous(mut self, previous: impl Into<BlockHash>) -> Self {
        self.previous = previous.into();
        self
    }

    pub fn representative(mut self, representative: impl Into<PublicKey>) -> Self {
        self.representative = representative.into();
        self
    }

    pub fn balance(mut self, balance: impl Into<Amount>) -> Self {
        self.balance = balance.into();
        self
    }

    pub fn link(mut self, link: impl Into<Link>) -> Self {
        self.link = link.into();
        self
    }

    pub fn build(self) -> Block {
        Block::new(
            self.account,
            self.previous,
            self.representative,
            self.balance,
            self.link,
        )
    }
}

impl Default for StateBlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
