//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `folio_core` linkage and that the built-in content validates.
//! - Keep output deterministic for quick local sanity checks.

use folio_core::{builtin_nav_items, PortfolioContent};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("folio_core ping={}", folio_core::ping());
    println!("folio_core version={}", folio_core::core_version());

    let content = match PortfolioContent::builtin() {
        Ok(content) => content,
        Err(err) => {
            eprintln!("folio_core content=error {err}");
            return ExitCode::FAILURE;
        }
    };
    let sections = builtin_nav_items()
        .into_iter()
        .map(|item| item.section_id)
        .collect::<Vec<_>>();
    println!("folio_core sections={}", sections.join(","));
    println!(
        "folio_core content projects={} education={} experience={} skill_categories={}",
        content.projects.len(),
        content.education.len(),
        content.experience.len(),
        content.about.skills_by_category.len()
    );
    ExitCode::SUCCESS
}
