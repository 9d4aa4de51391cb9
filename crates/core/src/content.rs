//! Closed vocabularies stored as TEXT columns.
//!
//! The database keeps the plain string (guarded by a `CHECK` constraint);
//! handlers parse incoming values through these enums so invalid input is
//! rejected with a validation error before reaching SQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [&'static str] = &[$($val),+];

            /// The stored TEXT value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "잘못된 {} 값입니다: '{other}'. 허용 값: {}",
                        $label,
                        Self::ALL.join(", "),
                    ))),
                }
            }
        }
    };
}

define_text_enum! {
    /// What kind of content a tag classifies.
    TagType ("태그 유형") {
        Press = "press",
        Story = "story",
        Product = "product",
        General = "general",
    }
}

define_text_enum! {
    /// Where a product image is displayed.
    ProductImageType ("제품 이미지 유형") {
        Main = "main",
        Gallery = "gallery",
        Detail = "detail",
        Thumbnail = "thumbnail",
    }
}

define_text_enum! {
    /// Handling state of a customer inquiry.
    InquiryStatus ("문의 상태") {
        New = "new",
        InProgress = "in_progress",
        Done = "done",
    }
}

define_text_enum! {
    /// Content type key used in the `content_tags` junction table.
    ContentType ("콘텐츠 유형") {
        Press = "press",
        Story = "story",
    }
}

/// Parse an optional TEXT value, returning `None` when absent.
pub fn parse_optional<T: FromStr<Err = CoreError>>(value: Option<&str>) -> Result<Option<T>, CoreError> {
    value.map(str::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn round_trips_stored_values() {
        for value in TagType::ALL {
            let parsed: TagType = value.parse().unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
        assert_eq!("in_progress".parse::<InquiryStatus>().unwrap(), InquiryStatus::InProgress);
    }

    #[test]
    fn rejects_unknown_value() {
        let err = "banner".parse::<ProductImageType>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("제품 이미지 유형") && msg.contains("main, gallery"));
    }

    #[test]
    fn serde_uses_stored_value() {
        let json = serde_json::to_string(&InquiryStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn parse_optional_passes_none_through() {
        assert_eq!(parse_optional::<TagType>(None).unwrap(), None);
        assert_eq!(parse_optional::<TagType>(Some("story")).unwrap(), Some(TagType::Story));
        assert!(parse_optional::<TagType>(Some("x")).is_err());
    }
}
