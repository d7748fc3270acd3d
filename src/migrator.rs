use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_sequence_counters::Migration),
            Box::new(m20250101_000002_create_account_tables::Migration),
            Box::new(m20250101_000003_create_purchase_order_tables::Migration),
            Box::new(m20250101_000004_create_journal_tables::Migration),
            Box::new(m20250101_000005_create_invoice_tables::Migration),
            Box::new(m20250101_000006_create_bank_transactions::Migration),
            Box::new(m20250101_000007_create_hr_tables::Migration),
            Box::new(m20250101_000008_create_work_orders::Migration),
            Box::new(m20250101_000009_create_approval_tables::Migration),
        ]
    }
}

mod m20250101_000001_create_sequence_counters {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_sequence_counters"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SequenceCounters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SequenceCounters::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SequenceCounters::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(SequenceCounters::Prefix).string().not_null())
                        .col(
                            ColumnDef::new(SequenceCounters::PeriodKey)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SequenceCounters::LastValue)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SequenceCounters::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Scope uniqueness is what makes first-use races detectable.
            manager
                .create_index(
                    Index::create()
                        .name("idx_sequence_counters_scope")
                        .table(SequenceCounters::Table)
                        .col(SequenceCounters::CompanyId)
                        .col(SequenceCounters::Prefix)
                        .col(SequenceCounters::PeriodKey)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SequenceCounters::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum SequenceCounters {
        Table,
        Id,
        CompanyId,
        Prefix,
        PeriodKey,
        LastValue,
        UpdatedAt,
    }
}

mod m20250101_000002_create_account_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_account_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LedgerAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LedgerAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LedgerAccounts::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(LedgerAccounts::Code).string().not_null())
                        .col(ColumnDef::new(LedgerAccounts::Name).string().not_null())
                        .col(
                            ColumnDef::new(LedgerAccounts::AccountType)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LedgerAccounts::Balance)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(LedgerAccounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LedgerAccounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_ledger_accounts_company_code")
                        .table(LedgerAccounts::Table)
                        .col(LedgerAccounts::CompanyId)
                        .col(LedgerAccounts::Code)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BankAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BankAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BankAccounts::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(BankAccounts::Name).string().not_null())
                        .col(
                            ColumnDef::new(BankAccounts::AccountNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankAccounts::Balance)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BankAccounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankAccounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(LedgerAccounts::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum LedgerAccounts {
        Table,
        Id,
        CompanyId,
        Code,
        Name,
        AccountType,
        Balance,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum BankAccounts {
        Table,
        Id,
        CompanyId,
        Name,
        AccountNumber,
        Balance,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000003_create_purchase_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_purchase_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Number).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::SupplierId).uuid().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Status).string().not_null())
                        .col(ColumnDef::new(PurchaseOrders::Currency).string().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrders::Subtotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::DiscountTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::TaxTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::Notes).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_orders_company_number")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::CompanyId)
                        .col(PurchaseOrders::Number)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::Description)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::Quantity)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::UnitPrice)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::DiscountPct)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::TaxPct)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::LineTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_purchase_order_lines_po")
                        .table(PurchaseOrderLines::Table)
                        .col(PurchaseOrderLines::PurchaseOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum PurchaseOrders {
        Table,
        Id,
        CompanyId,
        Number,
        SupplierId,
        Status,
        Currency,
        Subtotal,
        DiscountTotal,
        TaxTotal,
        TotalAmount,
        OrderDate,
        Notes,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(Iden)]
    enum PurchaseOrderLines {
        Table,
        Id,
        PurchaseOrderId,
        Description,
        Quantity,
        UnitPrice,
        DiscountPct,
        TaxPct,
        LineTotal,
        CreatedAt,
    }
}

mod m20250101_000004_create_journal_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_journal_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(JournalEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(JournalEntries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JournalEntries::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(JournalEntries::Number).string().not_null())
                        .col(ColumnDef::new(JournalEntries::Status).string().not_null())
                        .col(
                            ColumnDef::new(JournalEntries::EntryDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(JournalEntries::Memo).string().null())
                        .col(
                            ColumnDef::new(JournalEntries::TotalDebit)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::TotalCredit)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::PostedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntries::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_journal_entries_company_number")
                        .table(JournalEntries::Table)
                        .col(JournalEntries::CompanyId)
                        .col(JournalEntries::Number)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(JournalEntryLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(JournalEntryLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::JournalEntryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::LedgerAccountId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::Description)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::Debit)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::Credit)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(JournalEntryLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_journal_entry_lines_entry")
                        .table(JournalEntryLines::Table)
                        .col(JournalEntryLines::JournalEntryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(JournalEntryLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum JournalEntries {
        Table,
        Id,
        CompanyId,
        Number,
        Status,
        EntryDate,
        Memo,
        TotalDebit,
        TotalCredit,
        PostedAt,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(Iden)]
    enum JournalEntryLines {
        Table,
        Id,
        JournalEntryId,
        LedgerAccountId,
        Description,
        Debit,
        Credit,
        CreatedAt,
    }
}

mod m20250101_000005_create_invoice_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_invoice_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Invoices::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Invoices::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::Number).string().not_null())
                        .col(ColumnDef::new(Invoices::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::Status).string().not_null())
                        .col(ColumnDef::new(Invoices::Currency).string().not_null())
                        .col(
                            ColumnDef::new(Invoices::Subtotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::DiscountTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::TaxTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::PaidAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::BalanceAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::DueDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_invoices_company_number")
                        .table(Invoices::Table)
                        .col(Invoices::CompanyId)
                        .col(Invoices::Number)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InvoiceLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InvoiceLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InvoiceLines::InvoiceId).uuid().not_null())
                        .col(
                            ColumnDef::new(InvoiceLines::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InvoiceLines::Quantity).decimal().not_null())
                        .col(ColumnDef::new(InvoiceLines::UnitPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(InvoiceLines::DiscountPct)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InvoiceLines::TaxPct)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InvoiceLines::LineTotal).decimal().not_null())
                        .col(
                            ColumnDef::new(InvoiceLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_invoice_lines_invoice")
                        .table(InvoiceLines::Table)
                        .col(InvoiceLines::InvoiceId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InvoiceLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Invoices {
        Table,
        Id,
        CompanyId,
        Number,
        CustomerId,
        Status,
        Currency,
        Subtotal,
        DiscountTotal,
        TaxTotal,
        TotalAmount,
        PaidAmount,
        BalanceAmount,
        DueDate,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(Iden)]
    enum InvoiceLines {
        Table,
        Id,
        InvoiceId,
        Description,
        Quantity,
        UnitPrice,
        DiscountPct,
        TaxPct,
        LineTotal,
        CreatedAt,
    }
}

mod m20250101_000006_create_bank_transactions {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_bank_transactions"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BankTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BankTransactions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankTransactions::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BankTransactions::Number).string().not_null())
                        .col(
                            ColumnDef::new(BankTransactions::BankAccountId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BankTransactions::Status).string().not_null())
                        .col(ColumnDef::new(BankTransactions::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(BankTransactions::TransactedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BankTransactions::Memo).string().null())
                        .col(
                            ColumnDef::new(BankTransactions::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankTransactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankTransactions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(BankTransactions::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bank_transactions_company_number")
                        .table(BankTransactions::Table)
                        .col(BankTransactions::CompanyId)
                        .col(BankTransactions::Number)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bank_transactions_account")
                        .table(BankTransactions::Table)
                        .col(BankTransactions::BankAccountId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BankTransactions::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum BankTransactions {
        Table,
        Id,
        CompanyId,
        Number,
        BankAccountId,
        Status,
        Amount,
        TransactedAt,
        Memo,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }
}

mod m20250101_000007_create_hr_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000007_create_hr_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LeaveRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LeaveRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LeaveRequests::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(LeaveRequests::Number).string().not_null())
                        .col(ColumnDef::new(LeaveRequests::EmployeeId).uuid().not_null())
                        .col(ColumnDef::new(LeaveRequests::Status).string().not_null())
                        .col(ColumnDef::new(LeaveRequests::LeaveType).string().not_null())
                        .col(
                            ColumnDef::new(LeaveRequests::StartDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LeaveRequests::EndDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LeaveRequests::Days).decimal().not_null())
                        .col(ColumnDef::new(LeaveRequests::Reason).string().null())
                        .col(
                            ColumnDef::new(LeaveRequests::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LeaveRequests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LeaveRequests::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(LeaveRequests::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_leave_requests_company_number")
                        .table(LeaveRequests::Table)
                        .col(LeaveRequests::CompanyId)
                        .col(LeaveRequests::Number)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PayrollPeriods::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PayrollPeriods::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PayrollPeriods::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(PayrollPeriods::Number).string().not_null())
                        .col(ColumnDef::new(PayrollPeriods::Status).string().not_null())
                        .col(
                            ColumnDef::new(PayrollPeriods::PeriodMonth)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::GrossTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::NetTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::BankAccountId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::PaidAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PayrollPeriods::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_payroll_periods_company_number")
                        .table(PayrollPeriods::Table)
                        .col(PayrollPeriods::CompanyId)
                        .col(PayrollPeriods::Number)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PayrollPeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum LeaveRequests {
        Table,
        Id,
        CompanyId,
        Number,
        EmployeeId,
        Status,
        LeaveType,
        StartDate,
        EndDate,
        Days,
        Reason,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(Iden)]
    enum PayrollPeriods {
        Table,
        Id,
        CompanyId,
        Number,
        Status,
        PeriodMonth,
        GrossTotal,
        NetTotal,
        BankAccountId,
        PaidAt,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }
}

mod m20250101_000008_create_work_orders {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000008_create_work_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WorkOrders::CompanyId).uuid().not_null())
                        .col(ColumnDef::new(WorkOrders::Number).string().not_null())
                        .col(ColumnDef::new(WorkOrders::Status).string().not_null())
                        .col(ColumnDef::new(WorkOrders::ItemCode).string().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::QuantityPlanned)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::QuantityProduced)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::DueDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::StartedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_company_number")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::CompanyId)
                        .col(WorkOrders::Number)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum WorkOrders {
        Table,
        Id,
        CompanyId,
        Number,
        Status,
        ItemCode,
        QuantityPlanned,
        QuantityProduced,
        DueDate,
        StartedAt,
        CompletedAt,
        StatusChangedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }
}

mod m20250101_000009_create_approval_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000009_create_approval_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ApprovalWorkflows::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ApprovalWorkflows::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::DocumentKind)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalWorkflows::Name).string().not_null())
                        .col(
                            ColumnDef::new(ApprovalWorkflows::MinAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::MaxAmount)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalWorkflows::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_approval_workflows_scope")
                        .table(ApprovalWorkflows::Table)
                        .col(ApprovalWorkflows::CompanyId)
                        .col(ApprovalWorkflows::DocumentKind)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ApprovalLevels::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ApprovalLevels::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalLevels::WorkflowId).uuid().not_null())
                        .col(
                            ColumnDef::new(ApprovalLevels::LevelNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalLevels::ApproverId).uuid().not_null())
                        .col(
                            ColumnDef::new(ApprovalLevels::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_approval_levels_workflow_level")
                        .table(ApprovalLevels::Table)
                        .col(ApprovalLevels::WorkflowId)
                        .col(ApprovalLevels::LevelNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ApprovalRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ApprovalRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::CompanyId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::DocumentKind)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::DocumentId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::WorkflowId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::CurrentLevel)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalRequests::Status).string().not_null())
                        .col(
                            ColumnDef::new(ApprovalRequests::ApproverId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalRequests::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(ApprovalRequests::Priority)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ApprovalRequests::Reason).string().null())
                        .col(ColumnDef::new(ApprovalRequests::DecidedBy).uuid().null())
                        .col(
                            ColumnDef::new(ApprovalRequests::DecidedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ApprovalRequests::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_approval_requests_document")
                        .table(ApprovalRequests::Table)
                        .col(ApprovalRequests::DocumentKind)
                        .col(ApprovalRequests::DocumentId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_approval_requests_approver_status")
                        .table(ApprovalRequests::Table)
                        .col(ApprovalRequests::ApproverId)
                        .col(ApprovalRequests::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ApprovalRequests::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ApprovalLevels::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ApprovalWorkflows::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ApprovalWorkflows {
        Table,
        Id,
        CompanyId,
        DocumentKind,
        Name,
        MinAmount,
        MaxAmount,
        Active,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum ApprovalLevels {
        Table,
        Id,
        WorkflowId,
        LevelNumber,
        ApproverId,
        CreatedAt,
    }

    #[derive(Iden)]
    enum ApprovalRequests {
        Table,
        Id,
        CompanyId,
        DocumentKind,
        DocumentId,
        WorkflowId,
        CurrentLevel,
        Status,
        ApproverId,
        Amount,
        Priority,
        Reason,
        DecidedBy,
        DecidedAt,
        CreatedAt,
        UpdatedAt,
    }
}
