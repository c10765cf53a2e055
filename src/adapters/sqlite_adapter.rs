//! SQLite data adapter.
//!
//! One table per series, keyed by `(ticker, date)`. Dates are stored as
//! `YYYY-MM-DD` text.

use crate::domain::error::FundscreenError;
use crate::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesRecord,
};
use crate::ports::data_port::FundamentalDataPort;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Row, params};

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn pool_error(e: r2d2::Error) -> FundscreenError {
    FundscreenError::Data {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> FundscreenError {
    FundscreenError::DataQuery {
        reason: e.to_string(),
    }
}

fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let date_str: String = row.get(idx)?;
    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl SqliteAdapter {
    /// `pool_size` must be at least 1; see `config_validation::pool_size`.
    pub fn open(db_path: &str, pool_size: u32) -> Result<Self, FundscreenError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, FundscreenError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, FundscreenError> {
        self.pool.get().map_err(pool_error)
    }

    pub fn initialize_schema(&self) -> Result<(), FundscreenError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS dividend (
                    ticker TEXT NOT NULL,
                    date TEXT NOT NULL,
                    dividend REAL NOT NULL,
                    PRIMARY KEY (ticker, date)
                );
                CREATE TABLE IF NOT EXISTS financial_statement (
                    ticker TEXT NOT NULL,
                    date TEXT NOT NULL,
                    revenue REAL NOT NULL,
                    cost_of_revenue REAL NOT NULL,
                    PRIMARY KEY (ticker, date)
                );
                CREATE TABLE IF NOT EXISTS institutional_ownership (
                    ticker TEXT NOT NULL,
                    date TEXT NOT NULL,
                    ownership_percent REAL NOT NULL,
                    PRIMARY KEY (ticker, date)
                );",
            )
            .map_err(query_error)
    }

    pub fn insert_dividends(
        &self,
        ticker: &str,
        records: &[DividendRecord],
    ) -> Result<(), FundscreenError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_error)?;
        for r in records {
            tx.execute(
                "INSERT OR REPLACE INTO dividend (ticker, date, dividend) VALUES (?1, ?2, ?3)",
                params![ticker, format_date(r.date), r.dividend],
            )
            .map_err(query_error)?;
        }
        tx.commit().map_err(query_error)
    }

    pub fn insert_financial_statements(
        &self,
        ticker: &str,
        records: &[FinancialStatementRecord],
    ) -> Result<(), FundscreenError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_error)?;
        for r in records {
            tx.execute(
                "INSERT OR REPLACE INTO financial_statement (ticker, date, revenue, cost_of_revenue)
                 VALUES (?1, ?2, ?3, ?4)",
                params![ticker, format_date(r.date), r.revenue, r.cost_of_revenue],
            )
            .map_err(query_error)?;
        }
        tx.commit().map_err(query_error)
    }

    pub fn insert_institutional_ownership(
        &self,
        ticker: &str,
        records: &[InstitutionalOwnershipRecord],
    ) -> Result<(), FundscreenError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_error)?;
        for r in records {
            tx.execute(
                "INSERT OR REPLACE INTO institutional_ownership (ticker, date, ownership_percent)
                 VALUES (?1, ?2, ?3)",
                params![ticker, format_date(r.date), r.ownership_percent],
            )
            .map_err(query_error)?;
        }
        tx.commit().map_err(query_error)
    }

    fn query_series<T: SeriesRecord>(
        &self,
        query: &str,
        ticker: &str,
        map_row: impl Fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, FundscreenError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(query).map_err(query_error)?;
        let rows = stmt
            .query_map(params![ticker], map_row)
            .map_err(query_error)?;

        let mut records = Vec::new();
        for row in rows {
            let record = row.map_err(query_error)?;
            if !record.is_finite() {
                return Err(FundscreenError::Data {
                    reason: format!(
                        "{} row dated {} has a non-finite value",
                        ticker,
                        record.date()
                    ),
                });
            }
            records.push(record);
        }
        Ok(records)
    }
}

impl FundamentalDataPort for SqliteAdapter {
    fn fetch_dividends(&self, ticker: &str) -> Result<Vec<DividendRecord>, FundscreenError> {
        self.query_series(
            "SELECT date, dividend FROM dividend WHERE ticker = ?1 ORDER BY date ASC",
            ticker,
            |row| {
                Ok(DividendRecord {
                    date: parse_date(row, 0)?,
                    dividend: row.get(1)?,
                })
            },
        )
    }

    fn fetch_financial_statements(
        &self,
        ticker: &str,
    ) -> Result<Vec<FinancialStatementRecord>, FundscreenError> {
        self.query_series(
            "SELECT date, revenue, cost_of_revenue FROM financial_statement
             WHERE ticker = ?1 ORDER BY date ASC",
            ticker,
            |row| {
                Ok(FinancialStatementRecord {
                    date: parse_date(row, 0)?,
                    revenue: row.get(1)?,
                    cost_of_revenue: row.get(2)?,
                })
            },
        )
    }

    fn fetch_institutional_ownership(
        &self,
        ticker: &str,
    ) -> Result<Vec<InstitutionalOwnershipRecord>, FundscreenError> {
        self.query_series(
            "SELECT date, ownership_percent FROM institutional_ownership
             WHERE ticker = ?1 ORDER BY date ASC",
            ticker,
            |row| {
                Ok(InstitutionalOwnershipRecord {
                    date: parse_date(row, 0)?,
                    ownership_percent: row.get(1)?,
                })
            },
        )
    }

    fn list_tickers(&self) -> Result<Vec<String>, FundscreenError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT ticker FROM dividend
                 UNION SELECT ticker FROM financial_statement
                 UNION SELECT ticker FROM institutional_ownership
                 ORDER BY ticker",
            )
            .map_err(query_error)?;

        let rows = stmt.query_map([], |row| row.get(0)).map_err(query_error)?;

        let mut tickers = Vec::new();
        for row in rows {
            tickers.push(row.map_err(query_error)?);
        }
        Ok(tickers)
    }
}
