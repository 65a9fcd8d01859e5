//! Serde helpers for settings written by hand

/// Implements case-insensitive deserialization for a fieldless enum
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     ConfigKind,
///     CurrentFile => "currentfile",
///     NamedFile => "namedfile"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:literal),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Run,
        Debug,
    }

    impl_case_insensitive_deserialize!(
        Mode,
        Run => "run",
        Debug => "debug"
    );

    #[test]
    fn test_case_insensitive_deserialize() {
        let mode: Mode = serde_json::from_str(r#""run""#).unwrap();
        assert_eq!(mode, Mode::Run);

        let mode: Mode = serde_json::from_str(r#""DeBuG""#).unwrap();
        assert_eq!(mode, Mode::Debug);

        let err = serde_json::from_str::<Mode>(r#""profile""#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown variant 'profile'"));
        assert!(err.contains("expected one of: run, debug"));
    }
}
