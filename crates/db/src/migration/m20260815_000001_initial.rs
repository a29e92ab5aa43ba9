//! Initial database migration.
//!
//! Creates all enums, tables, indexes, and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & REFERENCE DATA
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(BANK_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: LEDGER
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 4: FIXED ACCOUNTS (RECURRENCE ENGINE)
        // ============================================================
        db.execute_unprepared(FIXED_ACCOUNTS_SQL).await?;
        db.execute_unprepared(FIXED_ACCOUNT_TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 5: PAYABLES / RECEIVABLES & INVESTMENTS
        // ============================================================
        db.execute_unprepared(OBLIGATIONS_SQL).await?;
        db.execute_unprepared(INVESTMENTS_SQL).await?;

        // ============================================================
        // PART 6: NOTIFICATIONS
        // ============================================================
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;

        // ============================================================
        // PART 7: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- User roles
CREATE TYPE user_role AS ENUM ('admin', 'user');

-- Income vs expense
CREATE TYPE entry_kind AS ENUM ('income', 'expense');

-- Recurrence period
CREATE TYPE periodicity AS ENUM (
    'daily',
    'weekly',
    'monthly',
    'quarterly',
    'yearly'
);

-- Occurrence lifecycle
CREATE TYPE occurrence_status AS ENUM ('pending', 'paid', 'overdue');

-- Payment methods
CREATE TYPE payment_method AS ENUM ('pix', 'boleto', 'card', 'transfer', 'cash');

-- Bank account kinds
CREATE TYPE bank_account_type AS ENUM ('checking', 'savings', 'wallet');

-- Payable vs receivable
CREATE TYPE obligation_direction AS ENUM ('payable', 'receivable');

-- Obligation lifecycle
CREATE TYPE obligation_status AS ENUM ('open', 'settled', 'overdue');

-- Investment kinds
CREATE TYPE investment_kind AS ENUM (
    'savings',
    'cdb',
    'stocks',
    'funds',
    'crypto',
    'other'
);

-- Notification kinds
CREATE TYPE notification_kind AS ENUM (
    'due_reminder',
    'overdue',
    'payment',
    'system'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    name VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'user',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    kind entry_kind NOT NULL,
    color VARCHAR(7),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (user_id, name, kind)
);

CREATE INDEX idx_categories_user ON categories(user_id);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    document VARCHAR(32),
    email VARCHAR(255),
    phone VARCHAR(32),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_suppliers_user ON suppliers(user_id);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    document VARCHAR(32),
    email VARCHAR(255),
    phone VARCHAR(32),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_customers_user ON customers(user_id);
";

const BANK_ACCOUNTS_SQL: &str = r"
CREATE TABLE bank_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    bank_name VARCHAR(255),
    account_type bank_account_type NOT NULL DEFAULT 'checking',
    balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_bank_accounts_user ON bank_accounts(user_id);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    bank_account_id UUID REFERENCES bank_accounts(id) ON DELETE SET NULL,
    category_id UUID REFERENCES categories(id) ON DELETE SET NULL,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    kind entry_kind NOT NULL,
    entry_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_transactions_user_date ON transactions(user_id, entry_date);
CREATE INDEX idx_transactions_account ON transactions(bank_account_id);
";

const FIXED_ACCOUNTS_SQL: &str = r"
CREATE TABLE fixed_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    category_id UUID NOT NULL REFERENCES categories(id),
    supplier_id UUID REFERENCES suppliers(id) ON DELETE SET NULL,
    bank_account_id UUID REFERENCES bank_accounts(id) ON DELETE SET NULL,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    kind entry_kind NOT NULL,
    periodicity periodicity NOT NULL,
    start_date DATE NOT NULL,
    next_due_date DATE NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_paid BOOLEAN NOT NULL DEFAULT false,
    payment_method payment_method,
    reminder_days INTEGER NOT NULL DEFAULT 3 CHECK (reminder_days >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_fixed_accounts_user ON fixed_accounts(user_id);
CREATE INDEX idx_fixed_accounts_due ON fixed_accounts(next_due_date) WHERE is_active = true;
";

const FIXED_ACCOUNT_TRANSACTIONS_SQL: &str = r"
CREATE TABLE fixed_account_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    fixed_account_id UUID NOT NULL REFERENCES fixed_accounts(id) ON DELETE CASCADE,
    due_date DATE NOT NULL,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    status occurrence_status NOT NULL DEFAULT 'pending',
    transaction_id UUID REFERENCES transactions(id) ON DELETE SET NULL,
    paid_at DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- A double sweep must not duplicate an occurrence
    UNIQUE (fixed_account_id, due_date)
);

CREATE INDEX idx_occurrences_status ON fixed_account_transactions(status)
    WHERE status IN ('pending', 'overdue');
";

const OBLIGATIONS_SQL: &str = r"
CREATE TABLE obligations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    direction obligation_direction NOT NULL,
    supplier_id UUID REFERENCES suppliers(id) ON DELETE SET NULL,
    customer_id UUID REFERENCES customers(id) ON DELETE SET NULL,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    due_date DATE NOT NULL,
    status obligation_status NOT NULL DEFAULT 'open',
    transaction_id UUID REFERENCES transactions(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Payables point at suppliers, receivables at customers
    CHECK (
        (direction = 'payable' AND customer_id IS NULL) OR
        (direction = 'receivable' AND supplier_id IS NULL)
    )
);

CREATE INDEX idx_obligations_user_due ON obligations(user_id, due_date);
";

const INVESTMENTS_SQL: &str = r"
CREATE TABLE investments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    kind investment_kind NOT NULL,
    amount_invested NUMERIC(19, 2) NOT NULL CHECK (amount_invested > 0),
    current_value NUMERIC(19, 2) NOT NULL,
    applied_at DATE NOT NULL,
    redeemed_at DATE,
    notes VARCHAR(1000),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_investments_user ON investments(user_id);
";

const NOTIFICATIONS_SQL: &str = r"
CREATE TABLE notifications (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    kind notification_kind NOT NULL,
    title VARCHAR(255) NOT NULL,
    message VARCHAR(1000) NOT NULL,
    is_read BOOLEAN NOT NULL DEFAULT false,
    fixed_account_transaction_id UUID
        REFERENCES fixed_account_transactions(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_notifications_user_unread ON notifications(user_id) WHERE is_read = false;
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Keeps updated_at current on every UPDATE
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_categories_updated_at BEFORE UPDATE ON categories
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_suppliers_updated_at BEFORE UPDATE ON suppliers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_customers_updated_at BEFORE UPDATE ON customers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_bank_accounts_updated_at BEFORE UPDATE ON bank_accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_transactions_updated_at BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_fixed_accounts_updated_at BEFORE UPDATE ON fixed_accounts
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_occurrences_updated_at BEFORE UPDATE ON fixed_account_transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_obligations_updated_at BEFORE UPDATE ON obligations
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_investments_updated_at BEFORE UPDATE ON investments
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS notifications CASCADE;
DROP TABLE IF EXISTS investments CASCADE;
DROP TABLE IF EXISTS obligations CASCADE;
DROP TABLE IF EXISTS fixed_account_transactions CASCADE;
DROP TABLE IF EXISTS fixed_accounts CASCADE;
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS bank_accounts CASCADE;
DROP TABLE IF EXISTS customers CASCADE;
DROP TABLE IF EXISTS suppliers CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS notification_kind;
DROP TYPE IF EXISTS investment_kind;
DROP TYPE IF EXISTS obligation_status;
DROP TYPE IF EXISTS obligation_direction;
DROP TYPE IF EXISTS bank_account_type;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS occurrence_status;
DROP TYPE IF EXISTS periodicity;
DROP TYPE IF EXISTS entry_kind;
DROP TYPE IF EXISTS user_role;
";
