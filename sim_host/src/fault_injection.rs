//! Deterministic fault injection for the simulated host
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: faults fire on the next N matching operations, never
//!   at random
//! - **Composable**: a plan holds any number of faults
//! - **Test-focused**: not intended for production use
//!
//! ## Example
//!
//! ```
//! use sim_host::fault_injection::{FaultPlan, HostFault};
//!
//! let plan = FaultPlan::new()
//!     .with_fault(HostFault::RejectEdits { count: 1 })
//!     .with_fault(HostFault::FailClipboardRead { count: 2 });
//! ```

/// A fault to inject into host operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFault {
    /// Reject the next N document edits
    RejectEdits { count: usize },
    /// Fail the next N clipboard reads (reported in the completion event)
    FailClipboardRead { count: usize },
    /// Fail the next N clipboard writes
    FailClipboardWrite { count: usize },
    /// Fail the next N file writes
    FailFileWrite { count: usize },
}

/// A plan describing all faults to inject
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    faults: Vec<HostFault>,
}

impl FaultPlan {
    /// Creates a new empty fault plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fault to the plan
    pub fn with_fault(mut self, fault: HostFault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn faults(&self) -> &[HostFault] {
        &self.faults
    }
}

/// Host operations a fault can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Edit,
    ClipboardRead,
    ClipboardWrite,
    FileWrite,
}

/// Applies a [`FaultPlan`], counting down each fault as it fires
#[derive(Debug, Default)]
pub struct FaultInjector {
    reject_edits: usize,
    fail_clipboard_read: usize,
    fail_clipboard_write: usize,
    fail_file_write: usize,
}

impl FaultInjector {
    pub fn new(plan: &FaultPlan) -> Self {
        let mut injector = Self::default();
        for fault in plan.faults() {
            injector.add(*fault);
        }
        injector
    }

    pub fn add(&mut self, fault: HostFault) {
        match fault {
            HostFault::RejectEdits { count } => self.reject_edits += count,
            HostFault::FailClipboardRead { count } => self.fail_clipboard_read += count,
            HostFault::FailClipboardWrite { count } => self.fail_clipboard_write += count,
            HostFault::FailFileWrite { count } => self.fail_file_write += count,
        }
    }

    /// Returns whether `operation` should fail now, consuming one fault
    pub fn should_fail(&mut self, operation: Operation) -> bool {
        let counter = match operation {
            Operation::Edit => &mut self.reject_edits,
            Operation::ClipboardRead => &mut self.fail_clipboard_read,
            Operation::ClipboardWrite => &mut self.fail_clipboard_write,
            Operation::FileWrite => &mut self.fail_file_write,
        };
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }

    /// Whether no fault is left to fire
    pub fn is_exhausted(&self) -> bool {
        self.reject_edits == 0
            && self.fail_clipboard_read == 0
            && self.fail_clipboard_write == 0
            && self.fail_file_write == 0
    }
}
