//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the memo core end to end: open storage, create, update, list,
//!   delete.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Environment:
//! - `MEMO_DB_PATH`: SQLite file to use; in-memory when unset.
//! - `MEMO_LOG_DIR`: absolute directory for rolling logs; logging is off
//!   when unset.

use memo_core::db::{open_db, open_db_in_memory};
use memo_core::{
    core_version, default_log_level, init_logging, validate_pagination, MemoReadService,
    MemoWriteService, SqliteMemoRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("memo_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(log_dir) = std::env::var("MEMO_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let conn = match std::env::var("MEMO_DB_PATH") {
        Ok(path) => open_db(path)?,
        Err(_) => open_db_in_memory()?,
    };
    let repo = SqliteMemoRepository::from_connection(&conn);
    let reader = MemoReadService::new(repo.clone());
    let writer = MemoWriteService::new(repo);

    println!("memo_core version={}", core_version());

    let created = writer.create_memo("smoke probe", "created by memo_cli")?;
    println!("created id={} regdate={}", created.id, created.regdate);

    let updated = writer.update_memo(&created.id, None, Some("updated by memo_cli"))?;
    println!("updated found={}", updated.is_some());

    let pagination = validate_pagination(None, None);
    let page = u32::try_from(pagination.page)?;
    let page_size = u32::try_from(pagination.page_size)?;
    for memo in reader.get_all_memos(page, page_size)? {
        println!(
            "memo id={} words={} modifiable={} expired={}",
            memo.record.id, memo.word_count, memo.can_be_modified, memo.is_expired
        );
    }

    let deleted = writer.delete_memo(&created.id)?;
    println!(
        "deleted={} exists={}",
        deleted,
        reader.get_memo_exists(&created.id)
    );
    Ok(())
}
