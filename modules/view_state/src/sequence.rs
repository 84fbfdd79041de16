// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

/// Generation counter for one kind of asynchronous request.
///
/// Every issued request gets the next number. Only the answer to the latest
/// issued request is accepted, answers to superseded requests are stale.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
    pending: Option<u64>,
}

impl RequestSequence {
    /// Issues the next request id and marks it as the pending one.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.issued
    }

    /// Accepts the answer to `id` if it is the pending request.
    ///
    /// Returns `false` for stale or unexpected answers. An accepted answer
    /// completes the pending request.
    pub fn complete(&mut self, id: u64) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Drops the pending request, its answer will be treated as stale.
    pub fn invalidate(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
