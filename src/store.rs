//! The remote operations the demo runs, and their implementation on top of the Aerospike client.

use aerospike::{
    task::Status, Bin, Bins, Client, IndexType, Key, QueryPolicy, Record, Recordset,
    Statement, Task, UDFLang, Value, WritePolicy,
};
use tracing::debug;

use crate::errors::{Error, Result};

/// Query for all records of a set whose `bin` equals `value`. Needs a secondary index on `bin`.
#[derive(Clone, Debug)]
pub struct EqualityQuery<'a> {
    pub namespace: &'a str,
    pub set_name: &'a str,
    pub bin: &'a str,
    pub value: Value,
}

/// A server-side stream function applied to the records of a query.
#[derive(Clone, Debug)]
pub struct UdfCall<'a> {
    /// Lua module name, without extension.
    pub package: &'a str,
    pub function: &'a str,
    pub args: Vec<Value>,
}

/// Database operations used by [`Demo`](crate::Demo).
///
/// Methods that start a long running server task (UDF registration, index creation) return once
/// the task is complete.
pub trait ProfileStore {
    /// Uploads a Lua module and stores it on the server as `server_path`.
    fn register_udf(&self, body: &[u8], server_path: &str) -> Result<()>;

    /// Removes the Lua module stored as `server_path`, the name it was registered under.
    fn remove_udf(&self, server_path: &str) -> Result<()>;

    /// Creates a string secondary index over `bin`.
    fn create_index(
        &self,
        namespace: &str,
        set_name: &str,
        bin: &str,
        index_name: &str,
    ) -> Result<()>;

    fn drop_index(&self, namespace: &str, set_name: &str, index_name: &str) -> Result<()>;

    /// Writes the bins of the record with string primary key `id`.
    fn put(&self, namespace: &str, set_name: &str, id: &str, bins: &[(&str, Value)]) -> Result<()>;

    /// Deletes a record, returning whether it existed.
    fn delete(&self, namespace: &str, set_name: &str, id: &str) -> Result<bool>;

    /// Returns every record matching the query.
    fn query(&self, query: &EqualityQuery<'_>) -> Result<Vec<Record>>;

    /// Runs `udf` over the records matching the query and returns the raw result records.
    fn aggregate(&self, query: &EqualityQuery<'_>, udf: &UdfCall<'_>) -> Result<Vec<Record>>;

    /// Returns the server's raw `udf-list` info response, if a node answered.
    fn udf_list(&self) -> Result<Option<String>>;
}

fn wait_for(task: &impl Task, name: &str) -> Result<()> {
    let status = match task.wait_till_complete(None)? {
        Status::Complete => {
            debug!(task = name, "task complete");
            return Ok(());
        }
        Status::InProgress => "in progress",
        Status::NotFound => "not found",
    };

    Err(Error::TaskIncomplete {
        task: name.to_owned(),
        status: status.to_owned(),
    })
}

fn statement(query: &EqualityQuery<'_>) -> Statement {
    let mut statement = Statement::new(query.namespace, query.set_name, Bins::All);
    statement.add_filter(as_eq!(query.bin, query.value.clone()));
    statement
}

fn drain(records: &Recordset) -> Result<Vec<Record>> {
    let collected = records.collect::<aerospike::Result<Vec<_>>>();
    records.close();
    Ok(collected?)
}

static REMOVE_OK: &str = "ok";
static REMOVE_NOT_FOUND: &str = "error=file_not_found";

fn remove_udf_command(server_path: &str) -> String {
    format!("udf-remove:filename={server_path};")
}

/// Interprets the reply to a `udf-remove` info command. A module that is already gone counts as
/// removed.
fn parse_remove_response(server_path: &str, response: Option<&str>) -> Result<()> {
    match response.map(str::trim) {
        Some(reply) if reply.eq_ignore_ascii_case(REMOVE_OK) => Ok(()),
        Some(reply) if reply.starts_with(REMOVE_NOT_FOUND) => {
            debug!(udf = server_path, "module already removed");
            Ok(())
        }
        Some(reply) => Err(Error::BadResponse(format!(
            "failed to remove {server_path}: {reply}"
        ))),
        None => Err(Error::BadResponse(format!(
            "no reply to removing {server_path}"
        ))),
    }
}

impl ProfileStore for Client {
    fn register_udf(&self, body: &[u8], server_path: &str) -> Result<()> {
        let task = Client::register_udf(
            self,
            &WritePolicy::default(),
            body,
            server_path,
            UDFLang::Lua,
        )?;
        wait_for(&task, server_path)
    }

    fn remove_udf(&self, server_path: &str) -> Result<()> {
        let command = remove_udf_command(server_path);
        let Some(node) = self.nodes().into_iter().next() else {
            return Err(Error::BadResponse(format!(
                "no node available to remove {server_path}"
            )));
        };
        let response = node.info(None, &[command.as_str()])?;
        parse_remove_response(server_path, response.get(&command).map(String::as_str))
    }

    fn create_index(
        &self,
        namespace: &str,
        set_name: &str,
        bin: &str,
        index_name: &str,
    ) -> Result<()> {
        let task = Client::create_index(
            self,
            &WritePolicy::default(),
            namespace,
            set_name,
            bin,
            index_name,
            IndexType::String,
        )?;
        wait_for(&task, index_name)
    }

    fn drop_index(&self, namespace: &str, set_name: &str, index_name: &str) -> Result<()> {
        Client::drop_index(self, &WritePolicy::default(), namespace, set_name, index_name)?;
        Ok(())
    }

    fn put(
        &self,
        namespace: &str,
        set_name: &str,
        id: &str,
        bins: &[(&str, Value)],
    ) -> Result<()> {
        let key = Key::new(namespace, set_name, Value::from(id))?;
        let bins: Vec<Bin<'_>> = bins
            .iter()
            .map(|(name, value)| Bin::new(*name, value.clone()))
            .collect();
        Client::put(self, &WritePolicy::default(), &key, &bins)?;
        Ok(())
    }

    fn delete(&self, namespace: &str, set_name: &str, id: &str) -> Result<bool> {
        let key = Key::new(namespace, set_name, Value::from(id))?;
        Ok(Client::delete(self, &WritePolicy::default(), &key)?)
    }

    fn query(&self, query: &EqualityQuery<'_>) -> Result<Vec<Record>> {
        let records = Client::query(self, &QueryPolicy::default(), statement(query))?;
        drain(&records)
    }

    fn aggregate(&self, query: &EqualityQuery<'_>, udf: &UdfCall<'_>) -> Result<Vec<Record>> {
        let mut statement = statement(query);
        statement.set_aggregate_function(udf.package, udf.function, Some(udf.args.as_slice()));

        let records = Client::query(self, &QueryPolicy::default(), statement)?;
        drain(&records)
    }

    fn udf_list(&self) -> Result<Option<String>> {
        const COMMAND: &str = "udf-list";

        let Some(node) = self.nodes().into_iter().next() else {
            return Ok(None);
        };
        let mut response = node.info(None, &[COMMAND])?;
        Ok(response.remove(COMMAND))
    }
}
