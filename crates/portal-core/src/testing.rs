//! Scripted in-memory remote service for broker and dispatcher tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{Credentials, SecurityContext, SessionId};
use crate::error::RemoteFault;
use crate::ports::{ActionParams, RemoteClient};

#[derive(Default)]
pub struct ScriptedRemote {
    pub opens: AtomicUsize,
    pub checks: AtomicUsize,
    pub invokes: AtomicUsize,
    pub closes: AtomicUsize,
    open_delay: Option<Duration>,
    open_failure: Mutex<Option<RemoteFault>>,
    check_answer: Mutex<Option<Result<bool, RemoteFault>>>,
    close_failure: Mutex<Option<RemoteFault>>,
    invoke_script: Mutex<VecDeque<Result<Value, RemoteFault>>>,
    rejected_sessions: Mutex<Vec<SessionId>>,
    seen_contexts: Mutex<Vec<SecurityContext>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `open_session` sleeps this long before answering
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    pub fn fail_opens_with(&self, fault: RemoteFault) {
        *self.open_failure.lock() = Some(fault);
    }

    pub fn answer_checks_with(&self, answer: Result<bool, RemoteFault>) {
        *self.check_answer.lock() = Some(answer);
    }

    pub fn fail_closes_with(&self, fault: RemoteFault) {
        *self.close_failure.lock() = Some(fault);
    }

    /// Queue the result of the next `invoke`; an empty queue answers `Ok(Null)`
    pub fn push_invoke(&self, result: Result<Value, RemoteFault>) {
        self.invoke_script.lock().push_back(result);
    }

    /// `invoke` answers an authentication fault for this session, ahead of the script
    pub fn reject_session(&self, id: &str) {
        self.rejected_sessions.lock().push(SessionId::from(id));
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn invokes(&self) -> usize {
        self.invokes.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn seen_contexts(&self) -> Vec<SecurityContext> {
        self.seen_contexts.lock().clone()
    }
}

#[async_trait]
impl RemoteClient for ScriptedRemote {
    async fn open_session(&self, _credentials: &Credentials) -> Result<SessionId, RemoteFault> {
        let n = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.open_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(fault) = self.open_failure.lock().clone() {
            return Err(fault);
        }
        Ok(SessionId::new(format!("session-{}", n)))
    }

    async fn check_session(&self, _context: &SecurityContext) -> Result<bool, RemoteFault> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.check_answer.lock().clone().unwrap_or(Ok(true))
    }

    async fn invoke(
        &self,
        _operation: &str,
        context: &SecurityContext,
        _params: &ActionParams,
    ) -> Result<Value, RemoteFault> {
        self.invokes.fetch_add(1, Ordering::SeqCst);
        self.seen_contexts.lock().push(context.clone());
        if self.rejected_sessions.lock().contains(&context.session_id) {
            return Err(RemoteFault::authentication("session is not valid"));
        }
        self.invoke_script.lock().pop_front().unwrap_or(Ok(Value::Null))
    }

    async fn close_session(&self, _context: &SecurityContext) -> Result<(), RemoteFault> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match self.close_failure.lock().clone() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}
