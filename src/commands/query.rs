use release_ledger::core::context::LedgerContext;
use release_ledger::core::error::LedgerResult;
use release_ledger::ledger::EntryRef;
use release_ledger::model::{EntryType, Release};

fn entry_icon(entry_type: EntryType) -> &'static str {
  match entry_type {
    EntryType::Feat => "✨",
    EntryType::Fix => "🐛",
    EntryType::Enhancement => "⚡",
    EntryType::Chore => "🔧",
    EntryType::Deprecation => "🗑️ ",
    EntryType::Docs => "📝",
  }
}

fn print_entry_line(entry: &EntryRef<'_>, with_version: bool) {
  let e = entry.entry;
  let scopes = if e.scopes.is_empty() {
    String::new()
  } else {
    format!("[{}] ", e.scopes.join(", "))
  };
  let breaking = if e.breaking { " ⚠️  BREAKING" } else { "" };

  if with_version {
    println!(
      "  {} {} ({})  {}{}{}",
      entry_icon(e.entry_type),
      entry.version,
      entry.date,
      scopes,
      e.summary(),
      breaking
    );
  } else {
    println!("  {} {}{}{}", entry_icon(e.entry_type), scopes, e.summary(), breaking);
  }
}

fn print_release(release: &Release) {
  match &release.codename {
    Some(codename) => println!("📦 {} ({}) \"{}\"", release.version, release.date, codename),
    None => println!("📦 {} ({})", release.version, release.date),
  }

  if let Some(description) = &release.description {
    println!("\n{}", description.trim());
  }

  for entry_type in EntryType::ALL {
    let entries: Vec<_> = release
      .changelog
      .iter()
      .filter(|e| e.entry_type == entry_type)
      .collect();
    if entries.is_empty() {
      continue;
    }

    println!("\n{} ({}):", entry_type.display_name(), entries.len());
    for entry in entries {
      print_entry_line(
        &EntryRef {
          version: &release.version,
          date: release.date,
          entry,
        },
        false,
      );
    }
  }

  if !release.known_issues.is_empty() {
    println!("\nKnown issues:");
    for issue in &release.known_issues {
      println!("  - {}", issue.trim());
    }
  }

  if !release.whats_next.is_empty() {
    println!("\nWhat's next:");
    for item in &release.whats_next {
      println!("  - {}", item.title);
    }
  }

  println!("\nCommits: {}", release.commits.len());
}

/// Run the show command
pub fn run_show(ctx: &LedgerContext, version: &str, json: bool) -> LedgerResult<()> {
  let ledger = ctx.load_ledger()?;
  let release = ledger.query_by_version(version)?;

  if json {
    println!("{}", serde_json::to_string_pretty(release)?);
  } else {
    print_release(release);
  }
  Ok(())
}

/// Run the breaking command
pub fn run_breaking(ctx: &LedgerContext, from: &str, to: &str, json: bool) -> LedgerResult<()> {
  let ledger = ctx.load_ledger()?;
  let entries = ledger.query_breaking_changes(from, to)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  if entries.is_empty() {
    println!("✅ No breaking changes in [{}, {})", from, to);
    return Ok(());
  }

  println!("⚠️  Breaking changes in [{}, {}): {}", from, to, entries.len());
  for entry in &entries {
    print_entry_line(entry, true);
  }
  Ok(())
}

/// Run the scope command
pub fn run_scope(ctx: &LedgerContext, scope: &str, json: bool) -> LedgerResult<()> {
  let ledger = ctx.load_ledger()?;
  let entries = ledger.query_by_scope(scope);

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  if entries.is_empty() {
    println!("No changelog entries tagged '{}'", scope);
    return Ok(());
  }

  println!("🏷️  '{}': {} entries", scope, entries.len());
  for entry in &entries {
    print_entry_line(entry, true);
  }
  Ok(())
}

/// Run the author command
pub fn run_author(ctx: &LedgerContext, who: &str, json: bool) -> LedgerResult<()> {
  let ledger = ctx.load_ledger()?;
  let activity = ledger.query_by_author(who);

  if json {
    println!("{}", serde_json::to_string_pretty(&activity)?);
    return Ok(());
  }

  if activity.is_empty() {
    println!("No commits or credited entries for '{}'", who);
    return Ok(());
  }

  println!("👤 {}", who);
  if !activity.entries.is_empty() {
    println!("\nCredited entries ({}):", activity.entries.len());
    for entry in &activity.entries {
      print_entry_line(entry, true);
    }
  }
  if !activity.commits.is_empty() {
    println!("\nCommits ({}):", activity.commits.len());
    for c in &activity.commits {
      println!(
        "  {} {} ({})  {}",
        c.commit.short_sha(),
        c.version,
        c.commit.date.format("%Y-%m-%d"),
        c.commit.description
      );
    }
  }
  Ok(())
}

/// Run the versions command
pub fn run_versions(ctx: &LedgerContext, json: bool) -> LedgerResult<()> {
  let ledger = ctx.load_ledger()?;
  let versions = ledger.versions();

  if json {
    println!("{}", serde_json::to_string_pretty(&versions)?);
    return Ok(());
  }

  println!("📚 {} release(s)", versions.len());
  for v in &versions {
    let breaking = if v.breaking > 0 {
      format!(", {} breaking", v.breaking)
    } else {
      String::new()
    };
    println!(
      "  {:<12} {}  {} entries{}, {} commits",
      v.version.to_string(),
      v.date,
      v.entries,
      breaking,
      v.commits
    );
  }

  if let Some(latest) = ledger.latest() {
    println!("\nLatest: {}", latest.version);
  }
  Ok(())
}
