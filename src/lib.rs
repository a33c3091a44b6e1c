//! # Easy DynamoDB
//!
//! An ergonomic adapter over a low-level DynamoDB-style store client.
//!
//! `easydynamodb` does two things around an existing client:
//!
//! - **Record codec**: application code works with plainly-shaped
//!   [`Record`]s of [`Value`]s; the adapter converts `Key` and `Item`
//!   parameter sections to the store's tagged attribute-value form before
//!   dispatch, and converts `Item`/`Attributes` result sections back.
//! - **Dual-mode calls**: every operation returns a [`Call`] that can be
//!   `.await`ed or handed a completion handler with
//!   [`Call::on_complete`]; both modes observe the one shared outcome.
//!
//! Transport, credentials, retry, and pagination belong to the underlying
//! client, injected as an [`Arc<dyn StoreClient>`](StoreClient). The
//! bundled [`InMemoryStoreClient`] backs tests and local development.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use easydynamodb::memory::InMemoryStoreClient;
//! use easydynamodb::{
//!     AttributeDefinition, AttributeType, CreateTableInput, EasyDynamoDb, GetItemInput,
//!     KeyRole, KeySchemaElement, PutItemInput, Record, Value,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = EasyDynamoDb::new(Arc::new(InMemoryStoreClient::new()));
//!
//! db.create_table(CreateTableInput {
//!     table_name: "Users".to_string(),
//!     attribute_definitions: vec![AttributeDefinition {
//!         attribute_name: "Id".to_string(),
//!         attribute_type: AttributeType::String,
//!     }],
//!     key_schema: vec![KeySchemaElement {
//!         attribute_name: "Id".to_string(),
//!         key_type: KeyRole::Hash,
//!     }],
//!     provisioned_throughput: None,
//! })
//! .await?;
//!
//! // Items are plain records; the adapter handles the wire tagging.
//! let mut item = Record::new();
//! item.insert("Id".to_string(), Value::from("user-1"));
//! item.insert("Age".to_string(), Value::from(30_i64));
//!
//! db.put_item(PutItemInput {
//!     table_name: "Users".to_string(),
//!     item: Some(item),
//!     ..Default::default()
//! })
//! .await?;
//!
//! let mut key = Record::new();
//! key.insert("Id".to_string(), Value::from("user-1"));
//!
//! // Deferred mode: await the call.
//! let fetched = db
//!     .get_item(GetItemInput {
//!         table_name: "Users".to_string(),
//!         key: Some(key.clone()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert!(fetched.item.is_some());
//!
//! // Callback mode: hand the same call a completion handler instead.
//! db.get_item(GetItemInput {
//!     table_name: "Users".to_string(),
//!     key: Some(key),
//!     ..Default::default()
//! })
//! .on_complete(|result| match result {
//!     Ok(output) => println!("found: {}", output.item.is_some()),
//!     Err(err) => eprintln!("get failed: {}", err),
//! });
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod call;
pub mod codec;
pub mod error;
pub mod memory;
pub mod types;
pub mod value;
pub mod wire;

pub use crate::adapter::EasyDynamoDb;
pub use crate::call::Call;
pub use crate::error::{ClientError, Error, Result};
pub use crate::memory::InMemoryStoreClient;
pub use crate::types::{
    AttributeDefinition, AttributeType, BatchGetItemInput, BatchGetItemOutput,
    BatchWriteItemInput, BatchWriteItemOutput, ConsumedCapacity, CreateTableInput,
    CreateTableOutput, DeleteItemInput, DeleteItemOutput, DeleteRequest, DeleteTableInput,
    DeleteTableOutput, DescribeTableInput, DescribeTableOutput, GetItemInput, GetItemOutput,
    KeyRole, KeySchemaElement, KeysAndAttributes, ListTablesInput, ListTablesOutput,
    ProjectionKind, ProvisionedThroughput, PutItemInput, PutItemOutput, PutRequest, QueryInput,
    QueryOutput, ReturnValues, ScanInput, ScanOutput, TableDescription, TableStatus,
    UpdateItemInput, UpdateItemOutput, UpdateTableInput, UpdateTableOutput, WaitTarget,
    WriteRequest,
};
pub use crate::value::{Number, Record, Value};
pub use crate::wire::{AttributeValue, WireRecord};

use async_trait::async_trait;

/// Result type for [`StoreClient`] operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The low-level store client this crate adapts.
///
/// One async method per wire operation. Implementations own transport,
/// credentials, retry, and pagination; the adapter never retries and
/// forwards every error returned here to the caller untouched.
///
/// Item-level methods receive their `Key`/`Item` sections already in wire
/// form (the adapter encodes before dispatch) and may assume those
/// sections are present.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Creates a table
    async fn create_table(&self, input: CreateTableInput) -> ClientResult<CreateTableOutput>;

    /// Deletes a table
    async fn delete_table(&self, input: DeleteTableInput) -> ClientResult<DeleteTableOutput>;

    /// Describes a table
    async fn describe_table(&self, input: DescribeTableInput)
        -> ClientResult<DescribeTableOutput>;

    /// Lists table names
    async fn list_tables(&self, input: ListTablesInput) -> ClientResult<ListTablesOutput>;

    /// Updates a table's settings
    async fn update_table(&self, input: UpdateTableInput) -> ClientResult<UpdateTableOutput>;

    /// Gets a single item by key
    async fn get_item(
        &self,
        input: GetItemInput<WireRecord>,
    ) -> ClientResult<GetItemOutput<WireRecord>>;

    /// Stores a single item
    async fn put_item(
        &self,
        input: PutItemInput<WireRecord>,
    ) -> ClientResult<PutItemOutput<WireRecord>>;

    /// Updates attributes of a single item
    async fn update_item(
        &self,
        input: UpdateItemInput<WireRecord>,
    ) -> ClientResult<UpdateItemOutput<WireRecord>>;

    /// Deletes a single item by key
    async fn delete_item(
        &self,
        input: DeleteItemInput<WireRecord>,
    ) -> ClientResult<DeleteItemOutput<WireRecord>>;

    /// Gets many items across tables
    async fn batch_get_item(&self, input: BatchGetItemInput)
        -> ClientResult<BatchGetItemOutput>;

    /// Puts and deletes many items across tables
    async fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> ClientResult<BatchWriteItemOutput>;

    /// Queries items by key condition
    async fn query(&self, input: QueryInput) -> ClientResult<QueryOutput>;

    /// Scans a whole table
    async fn scan(&self, input: ScanInput) -> ClientResult<ScanOutput>;

    /// Polls until the named condition holds for the table, or fails.
    ///
    /// Polling cadence and give-up behavior belong to the implementation.
    async fn wait_for(
        &self,
        target: WaitTarget,
        input: DescribeTableInput,
    ) -> ClientResult<DescribeTableOutput>;
}

#[cfg(test)]
mod adapter_test;
