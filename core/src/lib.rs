mod u256_struct;

mod amount;
pub use amount::Amount;

mod qualified_root;
pub use qualified_root::QualifiedRoot;

mod account_info;
pub use account_info::AccountInfo;

mod confirmation_height_info;
pub use confirmation_height_info::ConfirmationHeightInfo;

mod pending_key;
pub use pending_key::{PendingInfo, PendingKey};

mod blocks;
pub use blocks::*;

pub mod utils;

use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};
use std::sync::LazyLock;

u256_struct!(Account);
u256_struct!(BlockHash);
u256_struct!(Link);
u256_struct!(PublicKey);
u256_struct!(Root);

pub fn write_hex_bytes(bytes: &[u8], f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
    for &byte in bytes {
        write!(f, "{:02X}", byte)?;
    }
    Ok(())
}

impl Account {
    pub fn encode_account(&self) -> String {
        format!("nano_{}", self.encode_hex().to_lowercase())
    }
}

impl From<Link> for Account {
    fn from(link: Link) -> Self {
        Account::from_bytes(*link.as_bytes())
    }
}

impl From<&Link> for Account {
    fn from(link: &Link) -> Self {
        Account::from_bytes(*link.as_bytes())
    }
}

impl From<Account> for Link {
    fn from(account: Account) -> Self {
        Link::from_bytes(*account.as_bytes())
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Link::from_bytes(*hash.as_bytes())
    }
}

impl From<Link> for BlockHash {
    fn from(link: Link) -> Self {
        BlockHash::from_bytes(*link.as_bytes())
    }
}

impl From<Account> for Root {
    fn from(account: Account) -> Self {
        Root::from_bytes(*account.as_bytes())
    }
}

impl From<BlockHash> for Root {
    fn from(hash: BlockHash) -> Self {
        Root::from_bytes(*hash.as_bytes())
    }
}

impl From<Account> for PublicKey {
    fn from(account: Account) -> Self {
        PublicKey::from_bytes(*account.as_bytes())
    }
}

pub struct BlockHashBuilder {
    blake: Blake2bVar,
}

impl Default for BlockHashBuilder {
    fn default() -> Self {
        Self {
            blake: Blake2bVar::new(32).unwrap(),
        }
    }
}

impl BlockHashBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn update(mut self, data: impl AsRef<[u8]>) -> Self {
        self.blake.update(data.as_ref());
        self
    }

    pub fn build(self) -> BlockHash {
        let mut hash_bytes = [0u8; 32];
        self.blake.finalize_variable(&mut hash_bytes).unwrap();
        BlockHash::from_bytes(hash_bytes)
    }
}

pub static DEV_GENESIS_ACCOUNT: LazyLock<Account> = LazyLock::new(|| {
    Account::decode_hex("B0311EA55708D6A53C75CDBF88300259C6D018522FE3D4D0A242E431F9E8B6D0")
        .unwrap()
});

/// Open block of the dev genesis account. The genesis block is the only block
/// that receives from itself.
pub static DEV_GENESIS_BLOCK: LazyLock<Block> = LazyLock::new(|| {
    Block::new(
        *DEV_GENESIS_ACCOUNT,
        BlockHash::zero(),
        (*DEV_GENESIS_ACCOUNT).into(),
        Amount::MAX,
        (*DEV_GENESIS_ACCOUNT).into(),
    )
});

pub static DEV_GENESIS_HASH: LazyLock<BlockHash> = LazyLock::new(|| DEV_GENESIS_BLOCK.hash());
