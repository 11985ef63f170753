// bowl-client/tests/common/mod.rs
// Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bowl_client::notify::MemoryNotifier;
use bowl_client::{
    ClientConfig, ClientError, ClientResult, HttpClient, Identity, NetworkHttpClient, Role,
    SessionContext,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const CUSTOMER_ID: i64 = 7;

pub struct TestEnv {
    pub server: MockServer,
    pub http: NetworkHttpClient,
    pub notifier: MemoryNotifier,
}

pub async fn setup() -> TestEnv {
    setup_with(|config| config).await
}

pub async fn setup_with(customize: impl FnOnce(ClientConfig) -> ClientConfig) -> TestEnv {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let server = MockServer::start().await;
    let config = customize(ClientConfig::new(server.uri()).with_timeout(Duration::from_secs(5)));
    let http = NetworkHttpClient::new(&config).expect("client builds");
    TestEnv {
        server,
        http,
        notifier: MemoryNotifier::new(),
    }
}

fn identity(id: i64, role: Role, name: &str) -> Identity {
    Identity {
        id,
        username: name.to_lowercase(),
        display_name: name.to_string(),
        role,
        position: String::new(),
    }
}

pub fn customer_session() -> SessionContext {
    SessionContext::new(identity(CUSTOMER_ID, Role::Customer, "Nok"))
}

pub fn employee_session() -> SessionContext {
    SessionContext::new(identity(21, Role::Employee, "Somsak"))
}

pub fn manager_session() -> SessionContext {
    SessionContext::new(identity(1, Role::Manager, "Boss"))
}

/// Cart body from `(line id, name, price, quantity)` tuples
pub fn cart_json(lines: &[(i64, &str, i64, u32)]) -> Value {
    Value::Array(
        lines
            .iter()
            .map(|(id, name, price, quantity)| {
                json!({
                    "id": id,
                    "itemName": name,
                    "itemPrice": price,
                    "quantity": quantity,
                    "addedAt": "2024-03-01T12:00:00"
                })
            })
            .collect(),
    )
}

pub fn order_json(order_id: i64, customer_id: i64, status: &str, date: &str) -> Value {
    json!({
        "orderId": order_id,
        "customerId": customer_id,
        "customerName": "Nok",
        "items": [
            {"id": 1, "itemName": "Bamee Haeng", "itemPrice": 60, "quantity": 2, "subtotal": 120}
        ],
        "totalPrice": 120,
        "status": status,
        "orderDate": date,
        "createdAt": date
    })
}

pub fn menu_json() -> Value {
    json!([
        {"id": 1, "name": "Bamee Haeng", "price": 60, "category": "Noodles", "description": "Dry egg noodles", "active": true},
        {"id": 2, "name": "Thai Tea", "price": 35.5, "category": "Beverages", "description": null, "active": true},
        {"id": 3, "name": "Mango Sticky Rice", "price": 80, "category": "Desserts", "active": false}
    ])
}

// ====== Scripted transport ======

/// One scripted reply for `ScriptedHttp::get`
#[derive(Debug, Clone)]
pub enum Step {
    Reply(Value),
    Fail,
}

/// In-memory `HttpClient` replaying a script of GET replies
#[derive(Clone, Default)]
pub struct ScriptedHttp {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedHttp {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counts(counts: &[u64]) -> Self {
        Self::new(counts.iter().map(|c| Step::Reply(json!({"count": c, "status": "Pending"}))))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn unsupported<T>() -> ClientResult<T> {
        Err(ClientError::InvalidResponse("not scripted".into()))
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(value)) => Ok(serde_json::from_value(value)?),
            Some(Step::Fail) | None => Err(ClientError::Timeout {
                method: "GET".into(),
                path: path.into(),
                after: Duration::from_secs(10),
            }),
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, _: &str, _: &B) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn post_form<T: DeserializeOwned, F: Serialize + Sync>(&self, _: &str, _: &F) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn post_empty<T: DeserializeOwned>(&self, _: &str) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(&self, _: &str, _: &B) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn put_form<T: DeserializeOwned, F: Serialize + Sync>(&self, _: &str, _: &F) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn delete<T: DeserializeOwned>(&self, _: &str) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn delete_form<T: DeserializeOwned, F: Serialize + Sync>(&self, _: &str, _: &F) -> ClientResult<T> {
        Self::unsupported()
    }

    async fn get_page(&self, _: &str) -> ClientResult<String> {
        Self::unsupported()
    }
}
