//! The public operation surface.
//!
//! [`EasyDynamoDb`] wraps an injected [`StoreClient`] and exposes one
//! method per store operation, each returning a [`Call`]. Item-level
//! operations validate their required `Key`/`Item` section, encode it,
//! dispatch exactly once, and decode `Item`/`Attributes` result sections;
//! everything else is relayed untouched. Table administration, batch,
//! query/scan, and the wait-for-state operation are pure pass-throughs.

use std::sync::Arc;

use crate::call::Call;
use crate::types::{
    BatchGetItemInput, BatchGetItemOutput, BatchWriteItemInput, BatchWriteItemOutput,
    CreateTableInput, CreateTableOutput, DeleteItemInput, DeleteItemOutput, DeleteTableInput,
    DeleteTableOutput, DescribeTableInput, DescribeTableOutput, GetItemInput, GetItemOutput,
    ListTablesInput, ListTablesOutput, PutItemInput, PutItemOutput, QueryInput, QueryOutput,
    ScanInput, ScanOutput, UpdateItemInput, UpdateItemOutput, UpdateTableInput,
    UpdateTableOutput, WaitTarget,
};
use crate::StoreClient;

/// Ergonomic adapter over a low-level store client.
///
/// Holds no state beyond the shared client handle; concurrent calls never
/// interfere. Every method must be invoked within a tokio runtime
/// context, since operations are dispatched eagerly onto the runtime.
pub struct EasyDynamoDb {
    /// Underlying store client
    client: Arc<dyn StoreClient>,
}

impl EasyDynamoDb {
    /// Creates a new adapter around the given client
    pub fn new(client: Arc<dyn StoreClient>) -> Self {
        Self { client }
    }

    /// Returns the underlying client handle
    pub fn client(&self) -> &Arc<dyn StoreClient> {
        &self.client
    }

    /// Creates a table. Pass-through.
    pub fn create_table(&self, input: CreateTableInput) -> Call<CreateTableOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.create_table(input).await?) })
    }

    /// Deletes a table. Pass-through.
    pub fn delete_table(&self, input: DeleteTableInput) -> Call<DeleteTableOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.delete_table(input).await?) })
    }

    /// Describes a table. Pass-through.
    pub fn describe_table(&self, input: DescribeTableInput) -> Call<DescribeTableOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.describe_table(input).await?) })
    }

    /// Lists table names. Pass-through.
    pub fn list_tables(&self, input: ListTablesInput) -> Call<ListTablesOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.list_tables(input).await?) })
    }

    /// Updates a table's settings. Pass-through.
    pub fn update_table(&self, input: UpdateTableInput) -> Call<UpdateTableOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.update_table(input).await?) })
    }

    /// Gets an item.
    ///
    /// Requires a `Key` section; its record is encoded before dispatch
    /// and the result's `Item` section is decoded.
    pub fn get_item(&self, input: GetItemInput) -> Call<GetItemOutput> {
        let request = match input.into_wire() {
            Ok(request) => request,
            Err(err) => return Call::ready(Err(err)),
        };

        let client = Arc::clone(&self.client);
        Call::dispatch(async move {
            log::debug!("get_item: table={}", request.table_name);
            let output = client.get_item(request).await?;
            output.into_native()
        })
    }

    /// Puts an item.
    ///
    /// Requires an `Item` section; its record is encoded before dispatch
    /// and the result's `Attributes` section is decoded.
    pub fn put_item(&self, input: PutItemInput) -> Call<PutItemOutput> {
        let request = match input.into_wire() {
            Ok(request) => request,
            Err(err) => return Call::ready(Err(err)),
        };

        let client = Arc::clone(&self.client);
        Call::dispatch(async move {
            log::debug!("put_item: table={}", request.table_name);
            let output = client.put_item(request).await?;
            output.into_native()
        })
    }

    /// Updates an item.
    ///
    /// Requires a `Key` section; its record is encoded before dispatch
    /// and the result's `Attributes` section is decoded.
    pub fn update_item(&self, input: UpdateItemInput) -> Call<UpdateItemOutput> {
        let request = match input.into_wire() {
            Ok(request) => request,
            Err(err) => return Call::ready(Err(err)),
        };

        let client = Arc::clone(&self.client);
        Call::dispatch(async move {
            log::debug!("update_item: table={}", request.table_name);
            let output = client.update_item(request).await?;
            output.into_native()
        })
    }

    /// Deletes an item.
    ///
    /// Requires a `Key` section; its record is encoded before dispatch
    /// and the result's `Attributes` section is decoded.
    pub fn delete_item(&self, input: DeleteItemInput) -> Call<DeleteItemOutput> {
        let request = match input.into_wire() {
            Ok(request) => request,
            Err(err) => return Call::ready(Err(err)),
        };

        let client = Arc::clone(&self.client);
        Call::dispatch(async move {
            log::debug!("delete_item: table={}", request.table_name);
            let output = client.delete_item(request).await?;
            output.into_native()
        })
    }

    /// Gets many items across tables. Pass-through.
    pub fn batch_get_item(&self, input: BatchGetItemInput) -> Call<BatchGetItemOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.batch_get_item(input).await?) })
    }

    /// Puts and deletes many items across tables. Pass-through.
    pub fn batch_write_item(&self, input: BatchWriteItemInput) -> Call<BatchWriteItemOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.batch_write_item(input).await?) })
    }

    /// Queries items by key condition. Pass-through.
    pub fn query(&self, input: QueryInput) -> Call<QueryOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.query(input).await?) })
    }

    /// Scans a whole table. Pass-through.
    pub fn scan(&self, input: ScanInput) -> Call<ScanOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move { Ok(client.scan(input).await?) })
    }

    /// Waits until `target` holds for the table. Pass-through; polling
    /// mechanics belong to the underlying client.
    pub fn wait_for(
        &self,
        target: WaitTarget,
        input: DescribeTableInput,
    ) -> Call<DescribeTableOutput> {
        let client = Arc::clone(&self.client);
        Call::dispatch(async move {
            log::debug!("wait_for: target={} table={}", target, input.table_name);
            Ok(client.wait_for(target, input).await?)
        })
    }
}
