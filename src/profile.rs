//! Fixed records and naming used by the demo.

use aerospike::Value;

/// Bin holding the user name; the secondary index covers this bin.
pub const BIN_USERNAME: &str = "username";
/// Bin holding the password.
pub const BIN_PASSWORD: &str = "password";

/// Location of the bundled Lua module, as printed by the demo.
pub const UDF_SOURCE_PATH: &str = "udf/profile.lua";
/// Lua module name, used as the package name of aggregation queries.
pub const UDF_MODULE: &str = "profile";
/// Stream function inside [`UDF_MODULE`] used for aggregation.
pub const UDF_FUNCTION: &str = "check_password";
/// Source of the Lua module, compiled into the binary.
pub const UDF_BODY: &[u8] = include_bytes!("../udf/profile.lua");

/// User name the demo queries for.
pub const QUERY_USERNAME: &str = "Mary";
/// Password handed to [`UDF_FUNCTION`].
pub const QUERY_PASSWORD: &str = "ghjks";

/// Where the demo keeps its records and index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schema {
    pub namespace: String,
    pub set_name: String,
    pub index_name: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            namespace: "test".to_owned(),
            set_name: "profile".to_owned(),
            index_name: "profileindex".to_owned(),
        }
    }
}

impl Schema {
    /// Name the Lua module is registered under on the server.
    #[must_use]
    pub fn udf_server_path() -> String {
        format!("{UDF_MODULE}.lua")
    }
}

/// A single user profile record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Profile {
    /// Primary key of the record.
    pub id: &'static str,
    pub username: &'static str,
    pub password: &'static str,
}

impl Profile {
    /// Bin name and value pairs written for this profile.
    #[must_use]
    pub fn bins(&self) -> [(&'static str, Value); 2] {
        [
            (BIN_USERNAME, Value::from(self.username)),
            (BIN_PASSWORD, Value::from(self.password)),
        ]
    }
}

pub const PROFILES: [Profile; 5] = [
    Profile {
        id: "1",
        username: "Charlie",
        password: "cpass",
    },
    Profile {
        id: "2",
        username: "Bill",
        password: "hknfpkj",
    },
    Profile {
        id: "3",
        username: "Doug",
        password: "dj6554",
    },
    Profile {
        id: "4",
        username: "Mary",
        password: "ghjks",
    },
    Profile {
        id: "5",
        username: "Julie",
        password: "zzxzxvv",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = PROFILES.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROFILES.len());
    }

    #[test]
    fn queried_user_matches_password() {
        let profile = PROFILES
            .iter()
            .find(|p| p.username == QUERY_USERNAME)
            .unwrap();
        assert_eq!(profile.password, QUERY_PASSWORD);
    }

    #[test]
    fn bins_carry_username_and_password() {
        let [username, password] = PROFILES[0].bins();
        assert_eq!(username, (BIN_USERNAME, Value::from("Charlie")));
        assert_eq!(password, (BIN_PASSWORD, Value::from("cpass")));
    }

    #[test]
    fn default_schema() {
        let schema = Schema::default();
        assert_eq!(schema.namespace, "test");
        assert_eq!(schema.set_name, "profile");
        assert_eq!(schema.index_name, "profileindex");
        assert_eq!(Schema::udf_server_path(), "profile.lua");
    }

    #[test]
    fn bundled_udf_defines_function() {
        let source = std::str::from_utf8(UDF_BODY).unwrap();
        assert!(source.contains(&format!("function {UDF_FUNCTION}(")));
    }
}
