pub mod accounts;
pub mod approvals;
pub mod bank_transactions;
pub mod documents;
pub mod invoices;
pub mod journal_entries;
pub mod leave_requests;
pub mod ledger;
pub mod payroll_periods;
pub mod purchase_orders;
pub mod sequences;
pub mod totals;
pub mod work_orders;
