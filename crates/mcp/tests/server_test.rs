// End-to-end tests driving the stdio server loop over an in-memory pipe

use jasper_mcp::build_server;
use jasper_sdk::JasperClient;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
use tokio::task::JoinHandle;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Session {
    reader: Lines<BufReader<ReadHalf<DuplexStream>>>,
    writer: WriteHalf<DuplexStream>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Session {
    fn start(base_url: String) -> Self {
        let client = JasperClient::builder()
            .base_url(base_url)
            .api_key("sk-integration")
            .build()
            .unwrap();
        let server = build_server(client).unwrap();

        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let task = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let (client_read, writer) = tokio::io::split(client_io);
        Self {
            reader: BufReader::new(client_read).lines(),
            writer,
            task,
        }
    }

    async fn send(&mut self, message: &str) {
        self.writer.write_all(message.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
    }

    async fn request(&mut self, message: Value) -> Value {
        self.send(&message.to_string()).await;
        self.receive().await
    }

    async fn receive(&mut self) -> Value {
        let line = self.reader.next_line().await.unwrap().expect("server closed");
        serde_json::from_str(&line).unwrap()
    }

    async fn finish(mut self) {
        self.writer.shutdown().await.unwrap();
        drop(self.writer);
        self.task.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_initialize_and_list() {
    let jasper = MockServer::start().await;
    let mut session = Session::start(jasper.uri());

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "integration", "version": "0.0.1"}
        }}))
        .await;
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(response["result"]["serverInfo"]["name"], "jasper-ai-mcp");

    // no reply is expected, the next line read belongs to tools/list
    session
        .send(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;
    assert_eq!(response["id"], 2);
    assert_eq!(response["result"]["tools"].as_array().unwrap().len(), 6);

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}))
        .await;
    assert_eq!(response["result"]["resources"].as_array().unwrap().len(), 3);

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 4, "method": "resources/templates/list"}))
        .await;
    assert_eq!(
        response["result"]["resourceTemplates"][0]["uriTemplate"],
        "jasper://styles/{id}"
    );

    session.finish().await;
}

#[tokio::test]
async fn test_tool_calls_reach_jasper() {
    let jasper = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/command"))
        .and(header("X-API-Key", "sk-integration"))
        .and(body_json(json!({
            "inputs": {"command": "Write a tagline"},
            "options": {"completionType": "quality"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"text": "Write less, say more."}]
        })))
        .expect(1)
        .mount(&jasper)
        .await;

    Mock::given(method("GET"))
        .and(path("/styles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&jasper)
        .await;

    let mut session = Session::start(jasper.uri());

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {
            "name": "generate-content",
            "arguments": {"command": "Write a tagline"}
        }}))
        .await;
    assert_eq!(
        response["result"],
        json!({"content": [{"type": "text", "text": "Write less, say more."}]})
    );

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {
            "name": "get-jasper-style-guides",
            "arguments": {}
        }}))
        .await;
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(
        text,
        "Failed to make request to Jasper AI for get-jasper-style-guides: \
         Jasper API HTTP error! Status: 401, Method: GET"
    );

    session.finish().await;
}

#[tokio::test]
async fn test_resource_read_by_slug() {
    let jasper = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/audiences"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "a1", "name": "Finance Team"},
                {"id": "a2", "name": "Developers"}
            ]
        })))
        .mount(&jasper)
        .await;

    let mut session = Session::start(jasper.uri());

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": {
            "uri": "jasper://audiences/finance-team"
        }}))
        .await;
    assert_eq!(
        response["result"]["contents"],
        json!([{
            "uri": "jasper://audiences/finance-team",
            "mimeType": "text/plain",
            "text": "Audience: Finance Team\nID: a1",
            "_meta": {"audienceId": "a1"}
        }])
    );

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 2, "method": "resources/read", "params": {
            "uri": "jasper://unknown"
        }}))
        .await;
    assert_eq!(response["error"]["code"], -32002);

    session.finish().await;
}

#[tokio::test]
async fn test_protocol_errors() {
    let jasper = MockServer::start().await;
    let mut session = Session::start(jasper.uri());

    session.send("{this is not json").await;
    let response = session.receive().await;
    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["error"]["code"], -32700);

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 7, "method": "sampling/createMessage"}))
        .await;
    assert_eq!(response["id"], 7);
    assert_eq!(response["error"]["code"], -32601);

    let response = session
        .request(json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call", "params": {
            "name": "apply-style",
            "arguments": {"content": "missing style id"}
        }}))
        .await;
    assert_eq!(response["error"]["code"], -32602);

    session.finish().await;
}
