//! In-memory store client for testing and development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{
    AttributeDefinition, BatchGetItemInput, BatchGetItemOutput, BatchWriteItemInput,
    BatchWriteItemOutput, CreateTableInput, CreateTableOutput, DeleteItemInput,
    DeleteItemOutput, DeleteTableInput, DeleteTableOutput, DescribeTableInput,
    DescribeTableOutput, GetItemInput, GetItemOutput, KeySchemaElement, ListTablesInput,
    ListTablesOutput, ProvisionedThroughput, PutItemInput, PutItemOutput, QueryInput,
    QueryOutput, ReturnValues, ScanInput, ScanOutput, TableDescription, TableStatus,
    UpdateItemInput, UpdateItemOutput, UpdateTableInput, UpdateTableOutput, WaitTarget,
};
use crate::wire::WireRecord;
use crate::{ClientResult, StoreClient};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);
const WAIT_MAX_POLLS: usize = 50;

/// An in-memory implementation of the [`StoreClient`] trait.
///
/// This implementation keeps tables and items in process memory, which is
/// useful for testing and local development but loses everything when the
/// process terminates.
///
/// Supported subset of the expression surface: `query` understands a
/// single-equality `key_condition_expression` (`Name = :placeholder`),
/// `update_item` understands `SET`-only update expressions, and condition
/// expressions are rejected. `wait_for` is a real poll loop over table
/// state.
pub struct InMemoryStoreClient {
    /// Tables by name
    tables: Mutex<HashMap<String, Table>>,
}

struct Table {
    attribute_definitions: Vec<AttributeDefinition>,
    key_schema: Vec<KeySchemaElement>,
    provisioned_throughput: Option<ProvisionedThroughput>,

    /// Items by canonical key text
    items: HashMap<String, WireRecord>,
}

impl Table {
    fn description(&self, name: &str, status: TableStatus) -> TableDescription {
        TableDescription {
            table_name: Some(name.to_string()),
            table_status: Some(status),
            attribute_definitions: Some(self.attribute_definitions.clone()),
            key_schema: Some(self.key_schema.clone()),
            provisioned_throughput: self.provisioned_throughput,
            item_count: Some(self.items.len() as i64),
        }
    }

    /// Canonical text for the key attributes of `record`, in key schema
    /// order. Scalar key attributes serialize deterministically.
    fn item_key(&self, record: &WireRecord) -> ClientResult<String> {
        let mut parts = Vec::with_capacity(self.key_schema.len());
        for element in &self.key_schema {
            let attribute = record.get(&element.attribute_name).ok_or_else(|| {
                client_error(format!(
                    "item is missing key attribute {}",
                    element.attribute_name
                ))
            })?;
            parts.push(serde_json::to_string(attribute)?);
        }
        Ok(parts.join("/"))
    }

    /// Key attributes of `record`, as their own record.
    fn key_attributes(&self, record: &WireRecord) -> WireRecord {
        self.key_schema
            .iter()
            .filter_map(|element| {
                record
                    .get(&element.attribute_name)
                    .map(|value| (element.attribute_name.clone(), value.clone()))
            })
            .collect()
    }

    /// Items in canonical key order, for deterministic query/scan output.
    fn items_in_order(&self) -> Vec<WireRecord> {
        let mut entries: Vec<_> = self.items.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, item)| item.clone()).collect()
    }
}

impl InMemoryStoreClient {
    /// Creates a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }

    fn tables(&self) -> MutexGuard<'_, HashMap<String, Table>> {
        self.tables.lock().expect("tables lock poisoned")
    }
}

impl Default for InMemoryStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

fn client_error(message: impl Into<String>) -> ClientError {
    message.into().into()
}

fn table_not_found(name: &str) -> ClientError {
    client_error(format!("Table not found: {}", name))
}

/// Resolves the single-equality form `Name = :placeholder` against the
/// bound expression values.
fn resolve_equality(
    expression: &str,
    values: Option<&WireRecord>,
) -> ClientResult<(String, crate::wire::AttributeValue)> {
    let (name, placeholder) = expression
        .split_once('=')
        .ok_or_else(|| client_error("only `Name = :value` key conditions are supported"))?;
    let name = name.trim();
    let placeholder = placeholder.trim();

    let values =
        values.ok_or_else(|| client_error("key condition references no bound values"))?;
    let value = values
        .get(placeholder)
        .ok_or_else(|| client_error(format!("no value bound for {}", placeholder)))?;

    Ok((name.to_string(), value.clone()))
}

/// Applies a `SET name = :placeholder, ...` update expression to `item`.
fn apply_set_expression(
    expression: &str,
    values: Option<&WireRecord>,
    item: &mut WireRecord,
) -> ClientResult<()> {
    let assignments = expression
        .strip_prefix("SET ")
        .ok_or_else(|| client_error("only SET update expressions are supported"))?;

    for assignment in assignments.split(',') {
        let (name, value) = resolve_equality(assignment, values)?;
        item.insert(name, value);
    }

    Ok(())
}

#[async_trait]
impl StoreClient for InMemoryStoreClient {
    async fn create_table(&self, input: CreateTableInput) -> ClientResult<CreateTableOutput> {
        let mut tables = self.tables();

        if tables.contains_key(&input.table_name) {
            return Err(client_error(format!(
                "Table already exists: {}",
                input.table_name
            )));
        }

        let table = Table {
            attribute_definitions: input.attribute_definitions,
            key_schema: input.key_schema,
            provisioned_throughput: input.provisioned_throughput,
            items: HashMap::new(),
        };
        let description = table.description(&input.table_name, TableStatus::Active);
        tables.insert(input.table_name, table);

        Ok(CreateTableOutput {
            table_description: Some(description),
        })
    }

    async fn delete_table(&self, input: DeleteTableInput) -> ClientResult<DeleteTableOutput> {
        let mut tables = self.tables();

        let table = tables
            .remove(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;

        Ok(DeleteTableOutput {
            table_description: Some(table.description(&input.table_name, TableStatus::Deleting)),
        })
    }

    async fn describe_table(
        &self,
        input: DescribeTableInput,
    ) -> ClientResult<DescribeTableOutput> {
        let tables = self.tables();

        let table = tables
            .get(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;

        Ok(DescribeTableOutput {
            table: Some(table.description(&input.table_name, TableStatus::Active)),
        })
    }

    async fn list_tables(&self, input: ListTablesInput) -> ClientResult<ListTablesOutput> {
        let tables = self.tables();

        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();

        if let Some(start) = &input.exclusive_start_table_name {
            names.retain(|name| name > start);
        }

        let mut last_evaluated_table_name = None;
        if let Some(limit) = input.limit {
            let limit = limit.max(0) as usize;
            if names.len() > limit {
                names.truncate(limit);
                last_evaluated_table_name = names.last().cloned();
            }
        }

        Ok(ListTablesOutput {
            table_names: names,
            last_evaluated_table_name,
        })
    }

    async fn update_table(&self, input: UpdateTableInput) -> ClientResult<UpdateTableOutput> {
        let mut tables = self.tables();

        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;

        if let Some(throughput) = input.provisioned_throughput {
            table.provisioned_throughput = Some(throughput);
        }

        Ok(UpdateTableOutput {
            table_description: Some(table.description(&input.table_name, TableStatus::Active)),
        })
    }

    async fn get_item(
        &self,
        input: GetItemInput<WireRecord>,
    ) -> ClientResult<GetItemOutput<WireRecord>> {
        let tables = self.tables();

        let table = tables
            .get(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;
        let key = input
            .key
            .as_ref()
            .ok_or_else(|| client_error("missing Key"))?;

        let item = table.items.get(&table.item_key(key)?).cloned();

        Ok(GetItemOutput {
            item,
            consumed_capacity: None,
        })
    }

    async fn put_item(
        &self,
        input: PutItemInput<WireRecord>,
    ) -> ClientResult<PutItemOutput<WireRecord>> {
        if input.condition_expression.is_some() {
            return Err(client_error("condition expressions are not supported"));
        }

        let mut tables = self.tables();

        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;
        let item = input.item.ok_or_else(|| client_error("missing Item"))?;

        let key = table.item_key(&item)?;
        let previous = table.items.insert(key, item);

        let attributes = match input.return_values {
            Some(ReturnValues::AllOld) => previous,
            None | Some(ReturnValues::None) => None,
            Some(other) => {
                return Err(client_error(format!(
                    "unsupported ReturnValues for put_item: {}",
                    other
                )))
            }
        };

        Ok(PutItemOutput {
            attributes,
            consumed_capacity: None,
        })
    }

    async fn update_item(
        &self,
        input: UpdateItemInput<WireRecord>,
    ) -> ClientResult<UpdateItemOutput<WireRecord>> {
        if input.condition_expression.is_some() {
            return Err(client_error("condition expressions are not supported"));
        }
        if input.expression_attribute_names.is_some() {
            return Err(client_error(
                "expression attribute names are not supported",
            ));
        }

        let mut tables = self.tables();

        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;
        let key = input.key.ok_or_else(|| client_error("missing Key"))?;

        let canonical = table.item_key(&key)?;
        let previous = table.items.get(&canonical).cloned();

        // Updating a missing item creates it from its key attributes.
        let mut item = previous
            .clone()
            .unwrap_or_else(|| table.key_attributes(&key));

        if let Some(expression) = &input.update_expression {
            apply_set_expression(
                expression,
                input.expression_attribute_values.as_ref(),
                &mut item,
            )?;
        }

        table.items.insert(canonical, item.clone());

        let attributes = match input.return_values {
            Some(ReturnValues::AllOld) => previous,
            Some(ReturnValues::AllNew) => Some(item),
            None | Some(ReturnValues::None) => None,
            Some(other) => {
                return Err(client_error(format!(
                    "unsupported ReturnValues for update_item: {}",
                    other
                )))
            }
        };

        Ok(UpdateItemOutput {
            attributes,
            consumed_capacity: None,
        })
    }

    async fn delete_item(
        &self,
        input: DeleteItemInput<WireRecord>,
    ) -> ClientResult<DeleteItemOutput<WireRecord>> {
        if input.condition_expression.is_some() {
            return Err(client_error("condition expressions are not supported"));
        }

        let mut tables = self.tables();

        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;
        let key = input.key.ok_or_else(|| client_error("missing Key"))?;

        let canonical = table.item_key(&key)?;
        let previous = table.items.remove(&canonical);

        let attributes = match input.return_values {
            Some(ReturnValues::AllOld) => previous,
            None | Some(ReturnValues::None) => None,
            Some(other) => {
                return Err(client_error(format!(
                    "unsupported ReturnValues for delete_item: {}",
                    other
                )))
            }
        };

        Ok(DeleteItemOutput {
            attributes,
            consumed_capacity: None,
        })
    }

    async fn batch_get_item(
        &self,
        input: BatchGetItemInput,
    ) -> ClientResult<BatchGetItemOutput> {
        let tables = self.tables();

        let mut responses = HashMap::new();
        for (table_name, request) in input.request_items {
            let table = tables
                .get(&table_name)
                .ok_or_else(|| table_not_found(&table_name))?;

            let mut found = Vec::new();
            for key in &request.keys {
                if let Some(item) = table.items.get(&table.item_key(key)?) {
                    found.push(item.clone());
                }
            }
            responses.insert(table_name, found);
        }

        Ok(BatchGetItemOutput {
            responses,
            unprocessed_keys: HashMap::new(),
        })
    }

    async fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> ClientResult<BatchWriteItemOutput> {
        let mut tables = self.tables();

        for (table_name, requests) in input.request_items {
            let table = tables
                .get_mut(&table_name)
                .ok_or_else(|| table_not_found(&table_name))?;

            for request in requests {
                match (request.put_request, request.delete_request) {
                    (Some(put), None) => {
                        let key = table.item_key(&put.item)?;
                        table.items.insert(key, put.item);
                    }
                    (None, Some(delete)) => {
                        let key = table.item_key(&delete.key)?;
                        table.items.remove(&key);
                    }
                    _ => {
                        return Err(client_error(
                            "write request must contain exactly one of PutRequest or \
                             DeleteRequest",
                        ))
                    }
                }
            }
        }

        Ok(BatchWriteItemOutput {
            unprocessed_items: HashMap::new(),
        })
    }

    async fn query(&self, input: QueryInput) -> ClientResult<QueryOutput> {
        if input.filter_expression.is_some() {
            return Err(client_error("filter expressions are not supported"));
        }

        let tables = self.tables();

        let table = tables
            .get(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;
        let expression = input
            .key_condition_expression
            .as_deref()
            .ok_or_else(|| client_error("missing KeyConditionExpression"))?;

        let (name, expected) =
            resolve_equality(expression, input.expression_attribute_values.as_ref())?;

        let mut items: Vec<WireRecord> = table
            .items_in_order()
            .into_iter()
            .filter(|item| item.get(&name) == Some(&expected))
            .collect();
        let scanned_count = items.len() as i64;

        if input.scan_index_forward == Some(false) {
            items.reverse();
        }
        if let Some(limit) = input.limit {
            items.truncate(limit.max(0) as usize);
        }

        Ok(QueryOutput {
            count: items.len() as i64,
            scanned_count,
            items,
            last_evaluated_key: None,
        })
    }

    async fn scan(&self, input: ScanInput) -> ClientResult<ScanOutput> {
        if input.filter_expression.is_some() {
            return Err(client_error("filter expressions are not supported"));
        }

        let tables = self.tables();

        let table = tables
            .get(&input.table_name)
            .ok_or_else(|| table_not_found(&input.table_name))?;

        let mut items = table.items_in_order();
        let scanned_count = items.len() as i64;

        if let Some(limit) = input.limit {
            items.truncate(limit.max(0) as usize);
        }

        Ok(ScanOutput {
            count: items.len() as i64,
            scanned_count,
            items,
            last_evaluated_key: None,
        })
    }

    async fn wait_for(
        &self,
        target: WaitTarget,
        input: DescribeTableInput,
    ) -> ClientResult<DescribeTableOutput> {
        for _ in 0..WAIT_MAX_POLLS {
            let table = {
                let tables = self.tables();
                tables
                    .get(&input.table_name)
                    .map(|table| table.description(&input.table_name, TableStatus::Active))
            };

            match (target, table) {
                (WaitTarget::TableExists, Some(description)) => {
                    return Ok(DescribeTableOutput {
                        table: Some(description),
                    })
                }
                (WaitTarget::TableNotExists, None) => {
                    return Ok(DescribeTableOutput { table: None })
                }
                _ => tokio::time::sleep(WAIT_POLL_INTERVAL).await,
            }
        }

        Err(client_error(format!(
            "timed out waiting for {} on table {}",
            target, input.table_name
        )))
    }
}
