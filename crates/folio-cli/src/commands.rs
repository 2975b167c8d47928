use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use folio_sdk::{
    BlobRef, BlobResolver, FileVersionStore, Folio, FolioConfig, NamespaceTree, Node, NodeStatus,
    OwnerId, VersionId, VersionRecord,
};
use serde_json::json;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::cli::*;

/// Resolved settings for one invocation.
struct Workspace {
    config: FolioConfig,
    owner: OwnerId,
    format: OutputFormat,
}

impl Workspace {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = FolioConfig::load_or_default(&cli.config)
            .with_context(|| format!("reading {}", cli.config.display()))?;
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(owner) = &cli.owner {
            config.owner = Some(owner.clone());
        }
        let owner = config
            .owner_id()
            .context("set an owner with --owner or in the config file")?;
        Ok(Self {
            config,
            owner,
            format: cli.format,
        })
    }

    fn work_path(&self) -> PathBuf {
        self.config.work_path(&self.owner)
    }

    /// Session over the file store, resuming the saved working tree if any.
    fn open(&self) -> anyhow::Result<Folio> {
        let store = FileVersionStore::open(self.config.versions_dir())?
            .with_pretty(self.config.pretty);
        let store = Arc::new(store);

        let path = self.work_path();
        if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let root = folio_codec::from_json(&text)
                .with_context(|| format!("decoding {}", path.display()))?;
            let tree = NamespaceTree::from_root(root)?;
            debug!(path = %path.display(), "resumed working tree");
            Ok(Folio::resume(store, self.owner.clone(), tree)?)
        } else {
            Ok(Folio::open(store, self.owner.clone())?)
        }
    }

    fn save(&self, folio: &Folio) -> anyhow::Result<()> {
        let root = folio.tree().root();
        let text = if self.config.pretty {
            folio_codec::to_json_pretty(root)?
        } else {
            folio_codec::to_json(root)?
        };
        let path = self.work_path();
        fs::create_dir_all(&self.config.data_dir)?;
        write_atomic(&self.config.data_dir, &path, text.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "saved working tree");
        Ok(())
    }

    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Replace `path` with `bytes` via a synced temp file in `dir`, so a crash
/// leaves either the old file or the new one.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let ws = Workspace::from_cli(&cli)?;
    match cli.command {
        Command::Mkdir(args) => cmd_mkdir(&ws, args),
        Command::Put(args) => cmd_put(&ws, args),
        Command::Ls(args) => cmd_ls(&ws, args),
        Command::Rm(args) => cmd_rm(&ws, args),
        Command::Find(args) => cmd_find(&ws, args),
        Command::Status(args) => cmd_status(&ws, args),
        Command::Diff => cmd_diff(&ws),
        Command::Commit(args) => cmd_commit(&ws, args),
        Command::Log(args) => cmd_log(&ws, args),
        Command::Restore(args) => cmd_restore(&ws, args),
        Command::Url(args) => cmd_url(&ws, args),
        Command::Tree => cmd_tree(&ws),
    }
}

fn cmd_mkdir(ws: &Workspace, args: MkdirArgs) -> anyhow::Result<()> {
    let mut folio = ws.open()?;
    let name = folio.create_folder(&args.parent, &args.name)?;
    ws.save(&folio)?;
    report_created(&args.name, &name, "folder");
    Ok(())
}

fn cmd_put(ws: &Workspace, args: PutArgs) -> anyhow::Result<()> {
    let mut folio = ws.open()?;
    let blob = BlobRef::new(args.blob)?;
    let name = folio.add_file(&args.parent, &args.name, blob)?;
    ws.save(&folio)?;
    report_created(&args.name, &name, "file");
    Ok(())
}

fn report_created(requested: &str, actual: &str, kind: &str) {
    if requested == actual {
        println!("{} Created {} {}", "✓".green(), kind, actual.bold());
    } else {
        println!(
            "{} Created {} {} ({} was taken)",
            "✓".green(),
            kind,
            actual.bold(),
            requested.yellow()
        );
    }
}

fn cmd_ls(ws: &Workspace, args: LsArgs) -> anyhow::Result<()> {
    let folio = ws.open()?;
    if !folio.tree().contains(&args.path) {
        bail!("no such path: {}", args.path);
    }
    let children = folio.list(&args.path);
    if ws.json() {
        let items: Vec<_> = children
            .iter()
            .map(|n| json!({ "name": n.name(), "kind": n.kind().to_string() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    for node in children {
        println!("{}", display_name(node));
    }
    Ok(())
}

fn display_name(node: &Node) -> String {
    match node {
        Node::Folder(f) => format!("{}/", f.name()).blue().bold().to_string(),
        Node::File(f) => f.name().to_string(),
    }
}

fn cmd_rm(ws: &Workspace, args: RmArgs) -> anyhow::Result<()> {
    let mut folio = ws.open()?;
    let blobs = folio.remove(&args.path)?;
    ws.save(&folio)?;
    println!("{} Removed {}", "✓".green(), args.path.bold());
    for blob in blobs {
        println!("  {} {}", "release:".dimmed(), blob);
    }
    Ok(())
}

fn cmd_find(ws: &Workspace, args: FindArgs) -> anyhow::Result<()> {
    let folio = ws.open()?;
    let hits = folio.search(&args.prefix);
    if ws.json() {
        let items: Vec<_> = hits
            .iter()
            .map(|h| json!({ "path": h.path, "kind": h.node.kind().to_string() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("No matches.");
    }
    for hit in hits {
        println!("{}", hit.path);
    }
    Ok(())
}

fn status_label(status: NodeStatus) -> colored::ColoredString {
    match status {
        NodeStatus::Committed => "committed".green(),
        NodeStatus::Uncommitted => "uncommitted".yellow(),
    }
}

fn cmd_status(ws: &Workspace, args: StatusArgs) -> anyhow::Result<()> {
    let folio = ws.open()?;
    if let Some(path) = args.path {
        let status = folio.status(&path);
        if ws.json() {
            println!("{}", json!({ "path": path, "status": status.to_string() }));
        } else {
            println!("{}  {}", status_label(status), path);
        }
        return Ok(());
    }

    let entries = folio.annotate();
    if ws.json() {
        let items: Vec<_> = entries
            .iter()
            .map(|e| json!({ "path": e.path, "status": e.status.to_string() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    match folio.baseline() {
        Some(base) => println!("Baseline: {}", base.id.short_id().cyan()),
        None => println!("No commits yet."),
    }
    for entry in entries {
        println!("  {:<11}  {}", status_label(entry.status), entry.path);
    }
    Ok(())
}

fn cmd_diff(ws: &Workspace) -> anyhow::Result<()> {
    let folio = ws.open()?;
    let changes = folio.changes();
    if ws.json() {
        let value = json!({ "added": changes.added, "removed": changes.removed });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    if changes.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    for path in &changes.added {
        println!("{} {}", "+".green(), path.green());
    }
    for path in &changes.removed {
        println!("{} {}", "-".red(), path.red());
    }
    Ok(())
}

fn cmd_commit(ws: &Workspace, args: CommitArgs) -> anyhow::Result<()> {
    let mut folio = ws.open()?;
    let record = folio.commit(args.message.as_deref())?;
    ws.save(&folio)?;
    println!("{} Saved version {}", "✓".green().bold(), record.id.short_id().yellow());
    println!("  {}", record.message_or_empty());
    Ok(())
}

fn cmd_log(ws: &Workspace, args: LogArgs) -> anyhow::Result<()> {
    let folio = ws.open()?;
    let mut history = folio.history()?;
    if let Some(limit) = args.limit {
        history.truncate(limit);
    }
    let current = folio.baseline().map(|r| r.id);

    if ws.json() {
        let items: Vec<_> = history
            .iter()
            .map(|r| {
                json!({
                    "id": r.id.to_string(),
                    "timestamp": r.timestamp.to_rfc3339(),
                    "message": r.message,
                    "current": Some(r.id) == current,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if history.is_empty() {
        println!("No versions.");
        return Ok(());
    }
    for record in &history {
        let marker = if Some(record.id) == current { "*" } else { " " };
        if args.oneline {
            println!(
                "{} {} {}",
                marker.green(),
                record.id.short_id().yellow(),
                record.message_or_empty()
            );
        } else {
            println!("{} {}", marker.green(), record.id.to_string().yellow().bold());
            println!("  Date: {}", record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("  {}", record.message_or_empty());
        }
    }
    Ok(())
}

/// Accept a full version id or a unique prefix of one.
fn find_version(history: &[VersionRecord], input: &str) -> anyhow::Result<VersionId> {
    if let Ok(id) = input.parse::<VersionId>() {
        return Ok(id);
    }
    let mut matches = history
        .iter()
        .filter(|r| r.id.to_string().starts_with(input));
    let first = matches
        .next()
        .ok_or_else(|| anyhow!("no version matches {input}"))?;
    if matches.next().is_some() {
        bail!("version prefix {input} is ambiguous");
    }
    Ok(first.id)
}

fn cmd_restore(ws: &Workspace, args: RestoreArgs) -> anyhow::Result<()> {
    let mut folio = ws.open()?;
    let history = folio.history()?;
    let version = find_version(&history, &args.version)?;
    let record = folio.checkout(&version)?;
    ws.save(&folio)?;
    println!("{} Restored version {}", "✓".green().bold(), record.id.short_id().yellow());
    Ok(())
}

fn cmd_url(ws: &Workspace, args: UrlArgs) -> anyhow::Result<()> {
    let folio = ws.open()?;
    let node = folio.tree().resolve(&args.path)?;
    let blob = node
        .blob_ref()
        .ok_or_else(|| anyhow!("{} is a folder", args.path))?;
    let resolver = ws
        .config
        .blob_resolver()?
        .ok_or_else(|| anyhow!("blob_base_url is not configured"))?;
    println!("{}", resolver.url(blob)?);
    Ok(())
}

fn cmd_tree(ws: &Workspace) -> anyhow::Result<()> {
    let folio = ws.open()?;
    let root = folio.tree().root();
    if ws.json() {
        println!("{}", folio_codec::to_json_pretty(root)?);
        return Ok(());
    }
    print_tree(root, 0);
    Ok(())
}

fn print_tree(node: &Node, depth: usize) {
    println!("{}{}", "  ".repeat(depth), display_name(node));
    for child in node.children() {
        print_tree(child, depth + 1);
    }
}
