#[cfg(test)]
mod tests {
    use crate::adapter::EasyDynamoDb;
    use crate::error::Error;
    use crate::types::{
        BatchGetItemInput, BatchGetItemOutput, BatchWriteItemInput, BatchWriteItemOutput,
        CreateTableInput, CreateTableOutput, DeleteItemInput, DeleteItemOutput,
        DeleteTableInput, DeleteTableOutput, DescribeTableInput, DescribeTableOutput,
        GetItemInput, GetItemOutput, ListTablesInput, ListTablesOutput, PutItemInput,
        PutItemOutput, QueryInput, QueryOutput, ScanInput, ScanOutput, UpdateItemInput,
        UpdateItemOutput, UpdateTableInput, UpdateTableOutput, WaitTarget,
    };
    use crate::value::{Record, Value};
    use crate::wire::{AttributeValue, WireRecord};
    use crate::{ClientResult, StoreClient};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // Mock store client that records every dispatched operation and
    // relays canned outputs.
    #[derive(Default)]
    struct MockStoreClient {
        calls: Mutex<Vec<String>>,
        fail_with: Option<String>,
        get_item_output: Option<GetItemOutput<WireRecord>>,
        put_item_output: Option<PutItemOutput<WireRecord>>,
        list_tables_output: Option<ListTablesOutput>,
        seen_get_item: Mutex<Option<GetItemInput<WireRecord>>>,
    }

    impl MockStoreClient {
        fn new() -> Self {
            Self::default()
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn with_get_output(mut self, output: GetItemOutput<WireRecord>) -> Self {
            self.get_item_output = Some(output);
            self
        }

        fn with_put_output(mut self, output: PutItemOutput<WireRecord>) -> Self {
            self.put_item_output = Some(output);
            self
        }

        fn with_list_output(mut self, output: ListTablesOutput) -> Self {
            self.list_tables_output = Some(output);
            self
        }

        fn record<T>(&self, operation: &str, canned: Option<&T>) -> ClientResult<T>
        where
            T: Clone + Default,
        {
            self.calls
                .lock()
                .unwrap()
                .push(operation.to_string());

            if let Some(message) = &self.fail_with {
                return Err(message.clone().into());
            }

            Ok(canned.cloned().unwrap_or_default())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StoreClient for MockStoreClient {
        async fn create_table(
            &self,
            _input: CreateTableInput,
        ) -> ClientResult<CreateTableOutput> {
            self.record("create_table", None)
        }

        async fn delete_table(
            &self,
            _input: DeleteTableInput,
        ) -> ClientResult<DeleteTableOutput> {
            self.record("delete_table", None)
        }

        async fn describe_table(
            &self,
            _input: DescribeTableInput,
        ) -> ClientResult<DescribeTableOutput> {
            self.record("describe_table", None)
        }

        async fn list_tables(&self, _input: ListTablesInput) -> ClientResult<ListTablesOutput> {
            self.record("list_tables", self.list_tables_output.as_ref())
        }

        async fn update_table(
            &self,
            _input: UpdateTableInput,
        ) -> ClientResult<UpdateTableOutput> {
            self.record("update_table", None)
        }

        async fn get_item(
            &self,
            input: GetItemInput<WireRecord>,
        ) -> ClientResult<GetItemOutput<WireRecord>> {
            *self.seen_get_item.lock().unwrap() = Some(input);
            self.record("get_item", self.get_item_output.as_ref())
        }

        async fn put_item(
            &self,
            _input: PutItemInput<WireRecord>,
        ) -> ClientResult<PutItemOutput<WireRecord>> {
            self.record("put_item", self.put_item_output.as_ref())
        }

        async fn update_item(
            &self,
            _input: UpdateItemInput<WireRecord>,
        ) -> ClientResult<UpdateItemOutput<WireRecord>> {
            self.record("update_item", None)
        }

        async fn delete_item(
            &self,
            _input: DeleteItemInput<WireRecord>,
        ) -> ClientResult<DeleteItemOutput<WireRecord>> {
            self.record("delete_item", None)
        }

        async fn batch_get_item(
            &self,
            _input: BatchGetItemInput,
        ) -> ClientResult<BatchGetItemOutput> {
            self.record("batch_get_item", None)
        }

        async fn batch_write_item(
            &self,
            _input: BatchWriteItemInput,
        ) -> ClientResult<BatchWriteItemOutput> {
            self.record("batch_write_item", None)
        }

        async fn query(&self, _input: QueryInput) -> ClientResult<QueryOutput> {
            self.record("query", None)
        }

        async fn scan(&self, _input: ScanInput) -> ClientResult<ScanOutput> {
            self.record("scan", None)
        }

        async fn wait_for(
            &self,
            target: WaitTarget,
            _input: DescribeTableInput,
        ) -> ClientResult<DescribeTableOutput> {
            self.record(&format!("wait_for:{}", target), None)
        }
    }

    fn adapter(client: &Arc<MockStoreClient>) -> EasyDynamoDb {
        EasyDynamoDb::new(Arc::clone(client) as Arc<dyn StoreClient>)
    }

    fn id_key(id: &str) -> Record {
        let mut key = Record::new();
        key.insert("Id".to_string(), Value::from(id));
        key
    }

    #[tokio::test]
    async fn get_item_without_key_fails_before_dispatch() {
        let client = Arc::new(MockStoreClient::new());
        let db = adapter(&client);

        let err = db
            .get_item(GetItemInput {
                table_name: "Users".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(&err, Error::Validation(section) if section == "Key"));
        assert!(err.to_string().contains("Key"));
        assert!(client.calls().is_empty(), "client must not be dispatched");
    }

    #[tokio::test]
    async fn validation_failure_reaches_the_callback_mode_too() {
        let client = Arc::new(MockStoreClient::new());
        let db = adapter(&client);

        let (tx, rx) = tokio::sync::oneshot::channel();
        db.put_item(PutItemInput {
            table_name: "Users".to_string(),
            ..Default::default()
        })
        .on_complete(move |result| {
            tx.send(result).ok();
        });

        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(&err, Error::Validation(section) if section == "Item"));
        assert!(client.calls().is_empty(), "client must not be dispatched");
    }

    #[tokio::test]
    async fn update_and_delete_require_a_key() {
        let client = Arc::new(MockStoreClient::new());
        let db = adapter(&client);

        let err = db
            .update_item(UpdateItemInput {
                table_name: "Users".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::Validation(section) if section == "Key"));

        let err = db
            .delete_item(DeleteItemInput {
                table_name: "Users".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::Validation(section) if section == "Key"));

        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn key_is_encoded_before_dispatch() {
        let client = Arc::new(MockStoreClient::new());
        let db = adapter(&client);

        let mut key = Record::new();
        key.insert("Id".to_string(), Value::from(42_i64));

        db.get_item(GetItemInput {
            table_name: "Users".to_string(),
            key: Some(key),
            consistent_read: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

        let seen = client.seen_get_item.lock().unwrap().take().unwrap();
        assert_eq!(seen.table_name, "Users");
        assert_eq!(seen.consistent_read, Some(true));
        assert_eq!(seen.key.unwrap()["Id"], AttributeValue::number("42"));
        assert_eq!(client.calls(), vec!["get_item"]);
    }

    #[tokio::test]
    async fn item_section_is_decoded_for_the_caller() {
        let mut item = WireRecord::new();
        item.insert("Name".to_string(), AttributeValue::string("Alice"));
        item.insert("Age".to_string(), AttributeValue::number("30"));

        let client = Arc::new(MockStoreClient::new().with_get_output(GetItemOutput {
            item: Some(item),
            consumed_capacity: None,
        }));
        let db = adapter(&client);

        let output = db
            .get_item(GetItemInput {
                table_name: "Users".to_string(),
                key: Some(id_key("user-1")),
                ..Default::default()
            })
            .await
            .unwrap();

        let item = output.item.unwrap();
        assert_eq!(item["Name"], Value::String("Alice".to_string()));
        assert_eq!(item["Age"], Value::from(30_i64));
    }

    #[tokio::test]
    async fn put_item_delivers_decoded_attributes() {
        let mut attributes = WireRecord::new();
        attributes.insert("HashKey".to_string(), AttributeValue::string("key"));

        let client = Arc::new(MockStoreClient::new().with_put_output(PutItemOutput {
            attributes: Some(attributes),
            consumed_capacity: None,
        }));
        let db = adapter(&client);

        let mut item = Record::new();
        item.insert("HashKey".to_string(), Value::from("key"));

        let output = db
            .put_item(PutItemInput {
                table_name: "Users".to_string(),
                item: Some(item),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            output.attributes.unwrap()["HashKey"],
            Value::String("key".to_string())
        );
    }

    #[tokio::test]
    async fn underlying_errors_are_forwarded_verbatim() {
        let client = Arc::new(MockStoreClient::failing("connection reset"));
        let db = adapter(&client);

        let err = db
            .get_item(GetItemInput {
                table_name: "Users".to_string(),
                key: Some(id_key("user-1")),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match &err {
            Error::Underlying(source) => {
                assert_eq!(source.to_string(), "connection reset");
            }
            other => panic!("expected Underlying, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn underlying_errors_reach_the_callback_mode_too() {
        let client = Arc::new(MockStoreClient::failing("connection reset"));
        let db = adapter(&client);

        let (tx, rx) = tokio::sync::oneshot::channel();
        db.scan(ScanInput {
            table_name: "Users".to_string(),
            ..Default::default()
        })
        .on_complete(move |result| {
            tx.send(result).ok();
        });

        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::Underlying(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn both_modes_observe_structurally_identical_results() {
        let mut item = WireRecord::new();
        item.insert("Id".to_string(), AttributeValue::string("user-1"));

        let client = Arc::new(MockStoreClient::new().with_get_output(GetItemOutput {
            item: Some(item),
            consumed_capacity: None,
        }));
        let db = adapter(&client);

        let input = GetItemInput {
            table_name: "Users".to_string(),
            key: Some(id_key("user-1")),
            ..Default::default()
        };

        let awaited = db.get_item(input.clone()).await.unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        db.get_item(input).on_complete(move |result| {
            tx.send(result).ok();
        });
        let handled = rx.await.unwrap().unwrap();

        assert_eq!(awaited, handled);
        assert_eq!(client.calls(), vec!["get_item", "get_item"]);
    }

    #[tokio::test]
    async fn pass_through_operations_relay_without_codec_work() {
        let client = Arc::new(MockStoreClient::new().with_list_output(ListTablesOutput {
            table_names: vec!["Users".to_string(), "Orders".to_string()],
            last_evaluated_table_name: None,
        }));
        let db = adapter(&client);

        let output = db.list_tables(ListTablesInput::default()).await.unwrap();
        assert_eq!(output.table_names, vec!["Users", "Orders"]);

        db.create_table(CreateTableInput {
            table_name: "Users".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        db.query(QueryInput {
            table_name: "Users".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(client.calls(), vec!["list_tables", "create_table", "query"]);
    }

    #[tokio::test]
    async fn wait_for_forwards_the_target_state() {
        let client = Arc::new(MockStoreClient::new());
        let db = adapter(&client);

        db.wait_for(
            WaitTarget::TableExists,
            DescribeTableInput {
                table_name: "Users".to_string(),
            },
        )
        .await
        .unwrap();

        db.wait_for(
            WaitTarget::TableNotExists,
            DescribeTableInput {
                table_name: "Users".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            client.calls(),
            vec!["wait_for:tableExists", "wait_for:tableNotExists"]
        );
    }
}
