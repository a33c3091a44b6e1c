//! Operation parameter and result types, plus the exposed enumerations.
//!
//! Item-level inputs and outputs are generic over the record
//! representation: the public surface uses native [`Record`]s, the client
//! seam uses [`WireRecord`]s, and the same struct carries every other
//! field through both sides unchanged. The `into_wire`/`into_native`
//! conversions hold the validate-then-encode and decode steps the adapter
//! applies around each dispatch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::codec;
use crate::error::{Error, Result};
use crate::value::Record;
use crate::wire::WireRecord;

/// Scalar attribute type tags used in key and index definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// String
    #[serde(rename = "S")]
    String,

    /// Number
    #[serde(rename = "N")]
    Number,

    /// Binary
    #[serde(rename = "B")]
    Binary,
}

impl AttributeType {
    /// Wire string for this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a key attribute plays in a table's primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyRole {
    /// Partition key
    Hash,

    /// Sort key
    Range,
}

impl KeyRole {
    /// Wire string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Range => "RANGE",
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute projection kinds for secondary indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionKind {
    /// Project every attribute
    All,

    /// Project key attributes only
    KeysOnly,

    /// Project key attributes plus a named list
    Include,
}

impl ProjectionKind {
    /// Wire string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::KeysOnly => "KEYS_ONLY",
            Self::Include => "INCLUDE",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which attribute snapshot a write operation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValues {
    /// Return nothing
    None,

    /// Return the full item as it was before the write
    AllOld,

    /// Return only the updated attributes, pre-write
    UpdatedOld,

    /// Return the full item as it is after the write
    AllNew,

    /// Return only the updated attributes, post-write
    UpdatedNew,
}

impl ReturnValues {
    /// Wire string for this selector
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AllOld => "ALL_OLD",
            Self::UpdatedOld => "UPDATED_OLD",
            Self::AllNew => "ALL_NEW",
            Self::UpdatedNew => "UPDATED_NEW",
        }
    }
}

impl fmt::Display for ReturnValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states a table moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    /// Ready for use
    Active,

    /// Being created
    Creating,

    /// Being updated
    Updating,

    /// Being deleted
    Deleting,
}

impl TableStatus {
    /// Wire string for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Creating => "CREATING",
            Self::Updating => "UPDATING",
            Self::Deleting => "DELETING",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named conditions the wait-for-state operation can poll for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitTarget {
    /// Wait until the table exists and is active
    #[serde(rename = "tableExists")]
    TableExists,

    /// Wait until the table no longer exists
    #[serde(rename = "tableNotExists")]
    TableNotExists,
}

impl WaitTarget {
    /// Wire string for this condition
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableExists => "tableExists",
            Self::TableNotExists => "tableNotExists",
        }
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key or index attribute declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name
    #[serde(rename = "AttributeName")]
    pub attribute_name: String,

    /// Scalar type of the attribute
    #[serde(rename = "AttributeType")]
    pub attribute_type: AttributeType,
}

/// One element of a table's primary key schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchemaElement {
    /// Attribute name
    #[serde(rename = "AttributeName")]
    pub attribute_name: String,

    /// Role of the attribute in the key
    #[serde(rename = "KeyType")]
    pub key_type: KeyRole,
}

/// Provisioned read and write capacity for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedThroughput {
    /// Read capacity units
    #[serde(rename = "ReadCapacityUnits")]
    pub read_capacity_units: i64,

    /// Write capacity units
    #[serde(rename = "WriteCapacityUnits")]
    pub write_capacity_units: i64,
}

/// Description of a table as reported by the store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDescription {
    #[serde(rename = "TableName", default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    #[serde(rename = "TableStatus", default, skip_serializing_if = "Option::is_none")]
    pub table_status: Option<TableStatus>,

    #[serde(
        rename = "AttributeDefinitions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute_definitions: Option<Vec<AttributeDefinition>>,

    #[serde(rename = "KeySchema", default, skip_serializing_if = "Option::is_none")]
    pub key_schema: Option<Vec<KeySchemaElement>>,

    #[serde(
        rename = "ProvisionedThroughput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioned_throughput: Option<ProvisionedThroughput>,

    #[serde(rename = "ItemCount", default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
}

/// Capacity consumed by an operation, relayed as the store reports it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsumedCapacity {
    pub table_name: Option<String>,
    pub capacity_units: Option<f64>,
}

/// Parameters for `create_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTableInput {
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub key_schema: Vec<KeySchemaElement>,
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

/// Result of `create_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTableOutput {
    pub table_description: Option<TableDescription>,
}

/// Parameters for `delete_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteTableInput {
    pub table_name: String,
}

/// Result of `delete_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteTableOutput {
    pub table_description: Option<TableDescription>,
}

/// Parameters for `describe_table` and the wait-for-state operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescribeTableInput {
    pub table_name: String,
}

/// Result of `describe_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescribeTableOutput {
    pub table: Option<TableDescription>,
}

/// Parameters for `list_tables`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListTablesInput {
    pub exclusive_start_table_name: Option<String>,
    pub limit: Option<i32>,
}

/// Result of `list_tables`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListTablesOutput {
    pub table_names: Vec<String>,
    pub last_evaluated_table_name: Option<String>,
}

/// Parameters for `update_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateTableInput {
    pub table_name: String,
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

/// Result of `update_table`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateTableOutput {
    pub table_description: Option<TableDescription>,
}

/// Parameters for `get_item`
///
/// `R` is the record representation: native [`Record`] on the public
/// surface, [`WireRecord`] at the client seam.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetItemInput<R = Record> {
    pub table_name: String,

    /// The item's primary key. Required; the adapter encodes it before
    /// dispatch.
    pub key: Option<R>,

    pub consistent_read: Option<bool>,
    pub projection_expression: Option<String>,
}

/// Result of `get_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetItemOutput<R = Record> {
    /// The stored item, decoded for the caller
    pub item: Option<R>,

    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Parameters for `put_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutItemInput<R = Record> {
    pub table_name: String,

    /// The full item body. Required; the adapter encodes it before
    /// dispatch.
    pub item: Option<R>,

    pub condition_expression: Option<String>,

    /// Values bound in `condition_expression`, already wire-typed; the
    /// adapter relays them untouched.
    pub expression_attribute_values: Option<WireRecord>,

    pub return_values: Option<ReturnValues>,
}

/// Result of `put_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutItemOutput<R = Record> {
    /// Pre-write attribute snapshot, when one was requested
    pub attributes: Option<R>,

    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Parameters for `update_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateItemInput<R = Record> {
    pub table_name: String,

    /// The item's primary key. Required; the adapter encodes it before
    /// dispatch.
    pub key: Option<R>,

    pub update_expression: Option<String>,
    pub condition_expression: Option<String>,
    pub expression_attribute_names: Option<HashMap<String, String>>,

    /// Values bound in the expressions, already wire-typed; the adapter
    /// relays them untouched.
    pub expression_attribute_values: Option<WireRecord>,

    pub return_values: Option<ReturnValues>,
}

/// Result of `update_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateItemOutput<R = Record> {
    /// Attribute snapshot selected by `return_values`
    pub attributes: Option<R>,

    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Parameters for `delete_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteItemInput<R = Record> {
    pub table_name: String,

    /// The item's primary key. Required; the adapter encodes it before
    /// dispatch.
    pub key: Option<R>,

    pub condition_expression: Option<String>,

    /// Values bound in `condition_expression`, already wire-typed; the
    /// adapter relays them untouched.
    pub expression_attribute_values: Option<WireRecord>,

    pub return_values: Option<ReturnValues>,
}

/// Result of `delete_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteItemOutput<R = Record> {
    /// Pre-delete attribute snapshot, when one was requested
    pub attributes: Option<R>,

    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Keys requested from one table in a batch get
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeysAndAttributes {
    pub keys: Vec<WireRecord>,
    pub consistent_read: Option<bool>,
    pub projection_expression: Option<String>,
}

/// Parameters for `batch_get_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetItemInput {
    pub request_items: HashMap<String, KeysAndAttributes>,
}

/// Result of `batch_get_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchGetItemOutput {
    pub responses: HashMap<String, Vec<WireRecord>>,
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
}

/// A single put request inside a batch write
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutRequest {
    pub item: WireRecord,
}

/// A single delete request inside a batch write
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteRequest {
    pub key: WireRecord,
}

/// One batch write entry; exactly one of the two requests must be set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteRequest {
    pub put_request: Option<PutRequest>,
    pub delete_request: Option<DeleteRequest>,
}

/// Parameters for `batch_write_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteItemInput {
    pub request_items: HashMap<String, Vec<WriteRequest>>,
}

/// Result of `batch_write_item`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchWriteItemOutput {
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
}

/// Parameters for `query`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryInput {
    pub table_name: String,
    pub key_condition_expression: Option<String>,
    pub filter_expression: Option<String>,
    pub expression_attribute_names: Option<HashMap<String, String>>,
    pub expression_attribute_values: Option<WireRecord>,
    pub consistent_read: Option<bool>,
    pub scan_index_forward: Option<bool>,
    pub limit: Option<i32>,
    pub exclusive_start_key: Option<WireRecord>,
}

/// Result of `query`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryOutput {
    pub items: Vec<WireRecord>,
    pub count: i64,
    pub scanned_count: i64,
    pub last_evaluated_key: Option<WireRecord>,
}

/// Parameters for `scan`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanInput {
    pub table_name: String,
    pub filter_expression: Option<String>,
    pub expression_attribute_names: Option<HashMap<String, String>>,
    pub expression_attribute_values: Option<WireRecord>,
    pub limit: Option<i32>,
    pub exclusive_start_key: Option<WireRecord>,
}

/// Result of `scan`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutput {
    pub items: Vec<WireRecord>,
    pub count: i64,
    pub scanned_count: i64,
    pub last_evaluated_key: Option<WireRecord>,
}

impl GetItemInput<Record> {
    /// Validates the required `Key` section, encodes it, and carries every
    /// other field through unchanged.
    pub(crate) fn into_wire(self) -> Result<GetItemInput<WireRecord>> {
        let key = self
            .key
            .ok_or_else(|| Error::Validation("Key".to_string()))?;
        let key = codec::encode_record(&key)?;

        Ok(GetItemInput {
            table_name: self.table_name,
            key: Some(key),
            consistent_read: self.consistent_read,
            projection_expression: self.projection_expression,
        })
    }
}

impl GetItemOutput<WireRecord> {
    /// Decodes the `Item` section; every other field passes through.
    pub(crate) fn into_native(self) -> Result<GetItemOutput<Record>> {
        Ok(GetItemOutput {
            item: self
                .item
                .map(|item| codec::decode_record(&item))
                .transpose()?,
            consumed_capacity: self.consumed_capacity,
        })
    }
}

impl PutItemInput<Record> {
    /// Validates the required `Item` section, encodes it, and carries
    /// every other field through unchanged.
    pub(crate) fn into_wire(self) -> Result<PutItemInput<WireRecord>> {
        let item = self
            .item
            .ok_or_else(|| Error::Validation("Item".to_string()))?;
        let item = codec::encode_record(&item)?;

        Ok(PutItemInput {
            table_name: self.table_name,
            item: Some(item),
            condition_expression: self.condition_expression,
            expression_attribute_values: self.expression_attribute_values,
            return_values: self.return_values,
        })
    }
}

impl PutItemOutput<WireRecord> {
    /// Decodes the `Attributes` section; every other field passes through.
    pub(crate) fn into_native(self) -> Result<PutItemOutput<Record>> {
        Ok(PutItemOutput {
            attributes: self
                .attributes
                .map(|attributes| codec::decode_record(&attributes))
                .transpose()?,
            consumed_capacity: self.consumed_capacity,
        })
    }
}

impl UpdateItemInput<Record> {
    /// Validates the required `Key` section, encodes it, and carries every
    /// other field through unchanged.
    pub(crate) fn into_wire(self) -> Result<UpdateItemInput<WireRecord>> {
        let key = self
            .key
            .ok_or_else(|| Error::Validation("Key".to_string()))?;
        let key = codec::encode_record(&key)?;

        Ok(UpdateItemInput {
            table_name: self.table_name,
            key: Some(key),
            update_expression: self.update_expression,
            condition_expression: self.condition_expression,
            expression_attribute_names: self.expression_attribute_names,
            expression_attribute_values: self.expression_attribute_values,
            return_values: self.return_values,
        })
    }
}

impl UpdateItemOutput<WireRecord> {
    /// Decodes the `Attributes` section; every other field passes through.
    pub(crate) fn into_native(self) -> Result<UpdateItemOutput<Record>> {
        Ok(UpdateItemOutput {
            attributes: self
                .attributes
                .map(|attributes| codec::decode_record(&attributes))
                .transpose()?,
            consumed_capacity: self.consumed_capacity,
        })
    }
}

impl DeleteItemInput<Record> {
    /// Validates the required `Key` section, encodes it, and carries every
    /// other field through unchanged.
    pub(crate) fn into_wire(self) -> Result<DeleteItemInput<WireRecord>> {
        let key = self
            .key
            .ok_or_else(|| Error::Validation("Key".to_string()))?;
        let key = codec::encode_record(&key)?;

        Ok(DeleteItemInput {
            table_name: self.table_name,
            key: Some(key),
            condition_expression: self.condition_expression,
            expression_attribute_values: self.expression_attribute_values,
            return_values: self.return_values,
        })
    }
}

impl DeleteItemOutput<WireRecord> {
    /// Decodes the `Attributes` section; every other field passes through.
    pub(crate) fn into_native(self) -> Result<DeleteItemOutput<Record>> {
        Ok(DeleteItemOutput {
            attributes: self
                .attributes
                .map(|attributes| codec::decode_record(&attributes))
                .transpose()?,
            consumed_capacity: self.consumed_capacity,
        })
    }
}
