use std::path::Path;

use anyhow::Result;
use pagerangers_client::{ApiClient, Transport};
use pagerangers_core::{
    ApiContext, Bindings, Credentials, EndpointTable, EnvFile, EnvLookup, ExtractedResult, Settings,
};

/// Everything a command needs for one request: the endpoint table, the
/// credentials and a transport.
pub(crate) struct App<T> {
    context: ApiContext,
    credentials: Credentials,
    transport: T,
}

impl<T: Transport> App<T> {
    pub(crate) fn new(context: ApiContext, credentials: Credentials, transport: T) -> Self {
        Self { context, credentials, transport }
    }

    /// Credential bindings, to be extended with command arguments.
    pub(crate) fn bindings(&self) -> Bindings {
        self.credentials.bindings()
    }

    /// Resolves `endpoint`, sends it once and extracts its response fields.
    pub(crate) async fn call(&self, endpoint: &str, bindings: &Bindings) -> Result<ExtractedResult> {
        let request = self.context.resolve(endpoint, bindings)?;
        let payload = self.transport.send(&request).await?;
        Ok(self.context.extract(&payload, endpoint)?)
    }
}

impl App<ApiClient> {
    /// Loads settings, the endpoint table and credentials, in that order.
    ///
    /// Config errors come first so a broken table is reported even when
    /// credentials are also missing.
    pub(crate) fn from_env(config_flag: Option<&Path>) -> Result<Self> {
        let file = match EnvFile::default_path() {
            Some(path) => EnvFile::load(&path)?.unwrap_or_default(),
            None => EnvFile::default(),
        };
        let lookup = EnvLookup::with_process_env(file);
        let settings = Settings::from_lookup(&lookup);

        let table = match config_flag.or(settings.config_path.as_deref()) {
            Some(path) => EndpointTable::from_path(path)?,
            None => EndpointTable::builtin()?,
        };
        let context = ApiContext::new(table, settings.base_url.clone());

        let credentials = Credentials::from_lookup(&lookup)?;
        let client =
            ApiClient::new(settings.timeout_secs)?.with_redacted_secret(credentials.api_token.clone());
        tracing::debug!(base_url = context.base_url(), timeout = client.timeout_secs(), "settings loaded");
        Ok(Self::new(context, credentials, client))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pagerangers_client::{Transport, TransportError};
    use pagerangers_core::{ApiContext, Credentials, EndpointTable, RequestDescriptor};
    use serde_json::Value;

    use super::App;

    /// Transport returning one canned response and recording requests.
    pub(crate) struct FakeTransport {
        response: Mutex<Option<Result<Value, TransportError>>>,
        pub(crate) requests: Mutex<Vec<RequestDescriptor>>,
    }

    impl FakeTransport {
        pub(crate) fn new(response: Result<Value, TransportError>) -> Self {
            Self { response: Mutex::new(Some(response)), requests: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.lock().unwrap().take().expect("one request per test")
        }
    }

    pub(crate) fn app(payload: Value) -> App<FakeTransport> {
        app_with(Ok(payload))
    }

    pub(crate) fn app_with(response: Result<Value, TransportError>) -> App<FakeTransport> {
        let context =
            ApiContext::new(EndpointTable::builtin().unwrap(), Some("https://api.test".to_owned()));
        let credentials = Credentials { api_token: "token".to_owned(), project_hash: "hash".to_owned() };
        App::new(context, credentials, FakeTransport::new(response))
    }

    impl App<FakeTransport> {
        pub(crate) fn last_request(&self) -> RequestDescriptor {
            self.transport.requests.lock().unwrap().last().cloned().unwrap()
        }
    }
}
