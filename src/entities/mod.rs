pub mod approval_level;
pub mod approval_request;
pub mod approval_workflow;
pub mod bank_account;
pub mod bank_transaction;
pub mod invoice;
pub mod invoice_line;
pub mod journal_entry;
pub mod journal_entry_line;
pub mod leave_request;
pub mod ledger_account;
pub mod payroll_period;
pub mod purchase_order;
pub mod purchase_order_line;
pub mod sequence_counter;
pub mod work_order;
