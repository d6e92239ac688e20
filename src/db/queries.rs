//! SQL query constants
//!
//! Every statement against `bookBank` is parameterized; values never get
//! spliced into SQL text.

/// Create the table when it is not there yet
pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bookBank (
        id SERIAL PRIMARY KEY,
        ques VARCHAR(255),
        ans VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Every row, in whatever order the store returns them
pub const SELECT_ALL: &str = r#"
    SELECT id, ques, ans, created_at
    FROM bookBank
"#;

pub const INSERT: &str = r#"
    INSERT INTO bookBank (ques, ans)
    VALUES ($1, $2)
    RETURNING id
"#;

/// Touches only `ques` and `ans`; `id` and `created_at` never change
pub const UPDATE: &str = r#"
    UPDATE bookBank
    SET ques = $1, ans = $2
    WHERE id = $3
"#;

pub const DELETE: &str = r#"
    DELETE FROM bookBank
    WHERE id = $1
"#;

/// Fails when the table is missing, reads at most one row otherwise
pub const TABLE_READY: &str = "SELECT 1 FROM bookBank LIMIT 1";

/// Connectivity probe run once at startup
pub const PING: &str = "SELECT 1";
