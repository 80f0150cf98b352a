/// Создаёт новый доменный тип с валидацией значения.
#[macro_export]
macro_rules! newtype {
    ($tname:ident, String, "String", $validate_fn:ident) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            serde::Serialize,
            serde::Deserialize,
            std::cmp::PartialEq,
            std::cmp::Eq,
            derive_more::Display,
        )]
        #[serde(try_from = "String")]
        pub struct $tname(String);

        impl $tname {
            pub fn new(value: &str) -> anyhow::Result<Self> {
                let value = value.trim();
                $validate_fn(value)?;
                Ok(Self(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::convert::From<$tname> for String {
            fn from(value: $tname) -> String {
                value.0
            }
        }

        impl std::convert::TryFrom<String> for $tname {
            type Error = anyhow::Error;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                $tname::new(&value)
            }
        }

        impl std::str::FromStr for $tname {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $tname::new(s)
            }
        }
    };

    ($tname:ident, $type:ty, $try_from:literal, $validate_fn:ident) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            std::marker::Copy,
            serde::Serialize,
            serde::Deserialize,
            std::cmp::PartialEq,
            std::default::Default,
            derive_more::Display,
        )]
        #[serde(try_from = $try_from)]
        pub struct $tname($type);

        impl $tname {
            pub fn new(value: $type) -> anyhow::Result<Self> {
                $validate_fn(&value)?;
                Ok(Self(value))
            }

            pub fn value(&self) -> $type {
                self.0
            }
        }

        impl std::convert::TryFrom<$type> for $tname {
            type Error = anyhow::Error;

            fn try_from(value: $type) -> std::result::Result<Self, Self::Error> {
                $tname::new(value)
            }
        }
    };
}
