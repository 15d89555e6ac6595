//! Recording stand-ins for the provider and the mail transport.

use async_trait::async_trait;

use std::{collections::VecDeque, sync::Mutex};

use crate::{
    provider::{CompletionProvider, CompletionRequest, ProviderError},
    transport::{MailTransport, OutgoingMail, TransportError},
};

pub struct StubProvider {
    configured: bool,
    fallback: Result<String, ProviderError>,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl StubProvider {
    /// Answers every call with `content`
    pub fn succeeding(content: &str) -> Self {
        Self::with(true, Ok(content.to_string()), Vec::new())
    }

    /// Plays `script` in order, then fails with a 500
    pub fn scripted(script: Vec<Result<String, ProviderError>>) -> Self {
        Self::with(
            true,
            Err(ProviderError::with_status(500, "script exhausted")),
            script,
        )
    }

    pub fn failing(status: u16) -> Self {
        Self::with(true, Err(ProviderError::with_status(status, "stub failure")), Vec::new())
    }

    pub fn unconfigured() -> Self {
        Self::with(false, Ok("unreachable".to_string()), Vec::new())
    }

    fn with(
        configured: bool,
        fallback: Result<String, ProviderError>,
        script: Vec<Result<String, ProviderError>>,
    ) -> Self {
        Self {
            configured,
            fallback,
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub struct StubTransport {
    accept: bool,
    dispatched: Mutex<Vec<OutgoingMail>>,
}

impl StubTransport {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            dispatched: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            dispatched: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatched(&self) -> Vec<OutgoingMail> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for StubTransport {
    async fn dispatch(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        self.dispatched.lock().unwrap().push(mail.clone());
        if self.accept {
            Ok(())
        } else {
            let rejected = "rejected@".parse::<lettre::Address>().unwrap_err();
            Err(TransportError::AddressFormat(rejected))
        }
    }
}
