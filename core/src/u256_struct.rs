#[macro_export]
macro_rules! u256_struct {
    ($name:ident) => {
        #[derive(PartialEq, Eq, Clone, Copy, Hash, Default, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        #[allow(dead_code)]
        impl $name {
            pub const fn zero() -> Self {
                Self([0; 32])
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0; 32]
            }

            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn random() -> Self {
                Self(rand::random())
            }

            pub fn encode_hex(&self) -> String {
                use std::fmt::Write;
                let mut result = String::with_capacity(64);
                for byte in self.0 {
                    write!(&mut result, "{:02X}", byte).unwrap();
                }
                result
            }

            pub fn decode_hex(s: impl AsRef<str>) -> anyhow::Result<Self> {
                let s = s.as_ref();
                if s.is_empty() || s.len() > 64 {
                    anyhow::bail!("invalid length for {}: {}", stringify!($name), s.len());
                }
                if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
                    anyhow::bail!("invalid hex string for {}", stringify!($name));
                }
                let padded = format!("{:0>64}", s);
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = u8::from_str_radix(&padded[i * 2..i * 2 + 2], 16)?;
                }
                Ok(Self(bytes))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                let mut bytes = [0u8; 32];
                bytes[24..].copy_from_slice(&value.to_be_bytes());
                Self(bytes)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                $crate::write_hex_bytes(&self.0, f)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                $crate::write_hex_bytes(&self.0, f)
            }
        }
    };
}
