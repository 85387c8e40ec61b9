//! In-memory `SolanaRpc` stub for tests
//!
//! Pages, details and balances are seeded per address/signature; every page
//! request is recorded so pagination cursors can be asserted.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{SignatureInfo, SolanaRpc};

#[derive(Default)]
pub struct StubRpc {
    pages: Mutex<HashMap<String, VecDeque<Option<Vec<SignatureInfo>>>>>,
    details: Mutex<HashMap<String, Value>>,
    balances: Mutex<HashMap<String, u64>>,
    token_accounts: Mutex<HashMap<String, Vec<Value>>>,
    /// (address, before-cursor) for every page request observed
    pub page_requests: Mutex<Vec<(String, Option<String>)>>,
}

impl StubRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one history page for an address; `None` simulates a page failure
    pub fn push_page(&self, address: &str, page: Option<Vec<SignatureInfo>>) {
        self.pages
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push_back(page);
    }

    pub fn set_detail(&self, signature: &str, detail: Value) {
        self.details
            .lock()
            .unwrap()
            .insert(signature.to_string(), detail);
    }

    pub fn set_balance(&self, address: &str, lamports: u64) {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), lamports);
    }

    pub fn set_token_accounts(&self, address: &str, accounts: Vec<Value>) {
        self.token_accounts
            .lock()
            .unwrap()
            .insert(address.to_string(), accounts);
    }

    /// Cursors observed for one address, in request order
    pub fn recorded_cursors(&self, address: &str) -> Vec<Option<String>> {
        self.page_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(requested, _)| requested == address)
            .map(|(_, cursor)| cursor.clone())
            .collect()
    }
}

/// Successful signature entry
pub fn sig_info(signature: &str, block_time: i64) -> SignatureInfo {
    SignatureInfo {
        signature: signature.to_string(),
        err: None,
        block_time: Some(block_time),
        slot: None,
        memo: None,
    }
}

/// Signature entry flagged with an on-chain error marker
pub fn failed_sig_info(signature: &str, block_time: i64) -> SignatureInfo {
    SignatureInfo {
        signature: signature.to_string(),
        err: Some(json!({"InstructionError": [0, "Custom"]})),
        block_time: Some(block_time),
        slot: None,
        memo: None,
    }
}

#[async_trait]
impl SolanaRpc for StubRpc {
    async fn get_signatures_for_address(
        &self,
        address: &str,
        _limit: usize,
        before: Option<&str>,
    ) -> Option<Vec<SignatureInfo>> {
        self.page_requests
            .lock()
            .unwrap()
            .push((address.to_string(), before.map(str::to_string)));

        let entry = self
            .pages
            .lock()
            .unwrap()
            .get_mut(address)
            .and_then(|queue| queue.pop_front());

        match entry {
            Some(page) => page,
            // Exhausted queues behave like an empty page
            None => Some(Vec::new()),
        }
    }

    async fn get_transaction(&self, signature: &str) -> Option<Value> {
        self.details.lock().unwrap().get(signature).cloned()
    }

    async fn get_balance_lamports(&self, address: &str) -> Option<u64> {
        self.balances.lock().unwrap().get(address).copied()
    }

    async fn get_token_accounts(&self, address: &str) -> Option<Vec<Value>> {
        self.token_accounts.lock().unwrap().get(address).cloned()
    }
}
