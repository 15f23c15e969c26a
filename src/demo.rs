use std::io::Write;

use aerospike::{Record, Value};
use tracing::{debug, enabled, info, Level};

use crate::{
    errors::{Error, Result},
    info::format_info,
    profile::{
        Schema, BIN_USERNAME, PROFILES, QUERY_PASSWORD, QUERY_USERNAME, UDF_BODY, UDF_FUNCTION,
        UDF_MODULE, UDF_SOURCE_PATH,
    },
    store::{EqualityQuery, ProfileStore, UdfCall},
};

static SUCCESS_BIN: &str = "SUCCESS";
static FAILURE_BIN: &str = "FAILURE";

/// Extracts the value an aggregation query produced from one of its result records.
///
/// Successful results carry a `SUCCESS` bin; a `FAILURE` bin means the function raised an error
/// on the server.
pub fn aggregate_result(function: &str, mut record: Record) -> Result<Value> {
    if let Some(value) = record.bins.remove(SUCCESS_BIN) {
        return Ok(value);
    }

    match record.bins.remove(FAILURE_BIN) {
        Some(message) => Err(Error::UdfFailure {
            function: function.to_owned(),
            message: message.to_string(),
        }),
        None => Err(Error::BadResponse(format!(
            "aggregation result without {SUCCESS_BIN} or {FAILURE_BIN} bin: {record}"
        ))),
    }
}

/// Runs the profile demo against a [`ProfileStore`], writing a human readable transcript.
///
/// Every step prints a header line before it touches the store. The first failing step aborts
/// the run and its error is returned.
pub struct Demo<'a, S> {
    store: &'a S,
    schema: Schema,
}

impl<'a, S: ProfileStore> Demo<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self::with_schema(store, Schema::default())
    }

    #[must_use]
    pub fn with_schema(store: &'a S, schema: Schema) -> Self {
        Self { store, schema }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Registers the UDF, creates the index, writes the profiles and runs both queries.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        self.register_udf(out)?;
        self.create_index(out)?;
        self.add_records(out)?;
        self.query_on_username(out)?;
        self.query_for_password(out)?;
        Ok(())
    }

    pub fn register_udf(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "register {UDF_SOURCE_PATH}")?;
        self.store.register_udf(UDF_BODY, &Schema::udf_server_path())?;

        if enabled!(Level::DEBUG) {
            if let Some(list) = self.store.udf_list()? {
                debug!("{}", format_info("udf-list", &list));
            }
        }

        Ok(())
    }

    pub fn create_index(&self, out: &mut impl Write) -> Result<()> {
        let schema = &self.schema;
        writeln!(out, "create index {}", schema.index_name)?;
        self.store.create_index(
            &schema.namespace,
            &schema.set_name,
            BIN_USERNAME,
            &schema.index_name,
        )
    }

    pub fn add_records(&self, out: &mut impl Write) -> Result<()> {
        let schema = &self.schema;
        writeln!(out, "add records")?;

        for profile in &PROFILES {
            debug!(id = profile.id, username = profile.username, "writing profile");
            self.store.put(
                &schema.namespace,
                &schema.set_name,
                profile.id,
                &profile.bins(),
            )?;
        }

        Ok(())
    }

    /// Prints every record whose user name matches, returning how many there were.
    pub fn query_on_username(&self, out: &mut impl Write) -> Result<usize> {
        writeln!(out, "query on username")?;

        let records = self.store.query(&self.username_query())?;
        for record in &records {
            writeln!(out, "Record: {record}")?;
        }

        Ok(records.len())
    }

    /// Runs the password check as an aggregation over the matching user, returning the number of
    /// results.
    pub fn query_for_password(&self, out: &mut impl Write) -> Result<usize> {
        writeln!(out, "query for {QUERY_USERNAME}")?;

        let udf = UdfCall {
            package: UDF_MODULE,
            function: UDF_FUNCTION,
            args: vec![Value::from(QUERY_PASSWORD)],
        };
        let function = format!("{}.{}", udf.package, udf.function);

        let records = self.store.aggregate(&self.username_query(), &udf)?;
        let count = records.len();
        for record in records {
            let value = aggregate_result(&function, record)?;
            writeln!(out, "Result: {value}")?;
        }

        if count == 0 {
            writeln!(out, "No results returned")?;
        }

        Ok(count)
    }

    /// Removes the records, the index and the UDF module created by [`Self::run`].
    ///
    /// Missing records are ignored. The index and the module must exist.
    pub fn cleanup(&self) -> Result<()> {
        let schema = &self.schema;

        for profile in &PROFILES {
            let existed = self
                .store
                .delete(&schema.namespace, &schema.set_name, profile.id)?;
            debug!(id = profile.id, existed, "deleted profile");
        }

        self.store
            .drop_index(&schema.namespace, &schema.set_name, &schema.index_name)?;
        self.store.remove_udf(&Schema::udf_server_path())?;

        info!(index = %schema.index_name, "demo data removed");
        Ok(())
    }

    fn username_query(&self) -> EqualityQuery<'_> {
        EqualityQuery {
            namespace: &self.schema.namespace,
            set_name: &self.schema.set_name,
            bin: BIN_USERNAME,
            value: Value::from(QUERY_USERNAME),
        }
    }
}
