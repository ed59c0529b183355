//! Identity Assigner
//!
//! トランスポート層が払い出した ID と、クエリ文字列で渡された任意の表示名から
//! 接続のアイデンティティを決定します。

use super::{ConnectionId, DisplayName};

pub struct IdentityAssigner;

impl IdentityAssigner {
    /// Resolve `(id, name)` for a newly opened connection.
    ///
    /// `raw_connection_id` is used verbatim. `raw_query_name` is percent-decoded
    /// as UTF-8 (`+` decodes to a space). A name that fails to decode becomes
    /// empty; the failure is logged and never aborts the connection.
    pub fn assign(
        raw_connection_id: &str,
        raw_query_name: Option<&str>,
    ) -> (ConnectionId, DisplayName) {
        let id = ConnectionId::new(raw_connection_id);
        let name = match raw_query_name {
            Some(raw) => Self::decode_name(raw).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to decode display name for '{}' ({}); using empty name",
                    id,
                    e
                );
                DisplayName::empty()
            }),
            None => DisplayName::empty(),
        };

        (id, name)
    }

    fn decode_name(raw: &str) -> Result<DisplayName, std::string::FromUtf8Error> {
        let plus_as_space = raw.replace('+', " ");
        let decoded = urlencoding::decode(&plus_as_space)?;
        Ok(DisplayName::new(decoded.into_owned()))
    }
}
