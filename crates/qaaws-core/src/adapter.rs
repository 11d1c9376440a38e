//! The report adapter.

use std::sync::OnceLock;
use std::time::Instant;

use qaaws_model::{MessageValue, Node, OutgoingMessage, ParameterSpec, RequestKind, Table};
use qaaws_soap::{HttpTransport, Transport, Wsdl};
use tracing::{debug, info, info_span};

use crate::classify::classify;
use crate::client::SoapClient;
use crate::config::{Credentials, QaawsConfig};
use crate::error::{QaawsError, Result};
use crate::normalize::normalize;
use crate::options::RequestOptions;
use crate::prepare::prepare_parameters;
use crate::schema::SchemaProvider;

const REDACTED: &str = "[REDACTED]";
const LOGIN_PARAM: &str = "login";
const PASSWORD_PARAM: &str = "password";

/// Client for one published query service.
///
/// The service definition is fetched on first use and kept for the life
/// of the adapter.
pub struct Qaaws<T = HttpTransport> {
    config: QaawsConfig,
    credentials: Credentials,
    transport: T,
    wsdl: OnceLock<Wsdl>,
}

impl Qaaws<HttpTransport> {
    /// Create an adapter that talks HTTP.
    ///
    /// Fails with [`QaawsError::Configuration`] when the endpoint, cuid or
    /// credentials are missing.
    pub fn new(config: QaawsConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Qaaws<T> {
    /// Create an adapter over any transport.
    pub fn with_transport(config: QaawsConfig, transport: T) -> Result<Self> {
        let credentials = config.validate()?;
        debug!(
            wsdl = %config.wsdl_location(),
            credentials = credentials.label(),
            "created adapter"
        );
        Ok(Self {
            config,
            credentials,
            transport,
            wsdl: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &QaawsConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request and return its rows.
    pub fn request(&self, options: &RequestOptions) -> Result<Table> {
        let started = Instant::now();
        let target = classify(options);
        let span = info_span!("request", kind = %target.kind, operation = %target.operation);
        let _guard = span.enter();

        let message = match target.kind {
            RequestKind::ListOfValues => {
                if !options.params.is_empty() {
                    debug!(
                        ignored = options.params.len(),
                        "list-of-values requests take no parameters"
                    );
                }
                OutgoingMessage::new()
            }
            RequestKind::CustomAction | RequestKind::DefaultQuery => {
                prepare_parameters(self, &target, &options.params)?
            }
        };

        let tree = self.invoke(&target.operation, &message, &self.credentials)?;
        let table = normalize(&tree, &target)?;
        info!(
            records = table.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request complete"
        );
        Ok(table)
    }

    /// Names of the operations the service exposes.
    pub fn operations(&self) -> Result<Vec<String>> {
        self.soap_actions()
    }

    /// The service definition, fetched on first call.
    pub fn wsdl(&self) -> Result<&Wsdl> {
        if let Some(wsdl) = self.wsdl.get() {
            return Ok(wsdl);
        }
        let wsdl = self.fetch_wsdl()?;
        Ok(self.wsdl.get_or_init(|| wsdl))
    }

    fn fetch_wsdl(&self) -> Result<Wsdl> {
        let location = self.config.wsdl_location();
        debug!("WSDL location: {location}");
        let unusable = |reason: String| {
            QaawsError::ServiceDefinition(format!(
                "Cuid {} is invalid, or WSDL not present at {location} ({reason})",
                self.config.cuid
            ))
        };

        let response = self
            .transport
            .get(&location)
            .map_err(|err| unusable(err.to_string()))?;
        if !response.is_success() {
            return Err(unusable(format!("HTTP status {}", response.status)));
        }
        let wsdl = Wsdl::parse(&response.body).map_err(|err| unusable(err.to_string()))?;
        if wsdl.operations().is_empty() {
            return Err(unusable("no operations declared".to_string()));
        }
        info!(
            service = wsdl.service_name.as_deref().unwrap_or("?"),
            operations = wsdl.operations().len(),
            "loaded service definition"
        );
        Ok(wsdl)
    }
}

impl<T: Transport> SchemaProvider for Qaaws<T> {
    fn parameter_types(&self, operation: &str) -> Result<Option<ParameterSpec>> {
        self.wsdl()?.parameter_types(operation)
    }

    fn soap_actions(&self) -> Result<Vec<String>> {
        self.wsdl()?.soap_actions()
    }
}

impl<T: Transport> SoapClient for Qaaws<T> {
    fn invoke(
        &self,
        operation: &str,
        message: &OutgoingMessage,
        credentials: &Credentials,
    ) -> Result<Node> {
        let wsdl = self.wsdl()?;
        let op = wsdl
            .operation(operation)
            .ok_or_else(|| QaawsError::UnknownOperation {
                operation: operation.to_string(),
                valid: wsdl.operation_keys(),
            })?;

        let mut payload = message.clone();
        let session = match credentials {
            Credentials::Login { username, password } => {
                payload.insert(LOGIN_PARAM, MessageValue::scalar(username.clone()));
                payload.insert(PASSWORD_PARAM, MessageValue::scalar(password.clone()));
                None
            }
            Credentials::Session(token) => Some(token.as_str()),
        };
        debug!(
            operation = %op.name,
            soap_action = %op.soap_action,
            session_header = session.is_some(),
            "message: {}",
            describe(&payload)
        );

        qaaws_soap::invoke(
            &self.transport,
            &self.config.endpoint,
            wsdl,
            op,
            &payload,
            session,
        )
        .map_err(QaawsError::from)
    }
}

/// One-line rendering of a message with the password hidden.
fn describe(message: &OutgoingMessage) -> String {
    message
        .iter()
        .map(|(name, value)| {
            let rendered = if name == PASSWORD_PARAM {
                REDACTED.to_string()
            } else {
                describe_value(value)
            };
            format!("{name}={rendered}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_value(value: &MessageValue) -> String {
    match value {
        MessageValue::Scalar(text) => text.clone(),
        MessageValue::Repeated(values) => format!("[{}]", values.join("; ")),
        MessageValue::Nested(inner) => format!("{{{}}}", describe(inner)),
    }
}
