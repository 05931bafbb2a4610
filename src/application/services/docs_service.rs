//! Documentation combiner - Stitches project markdown into one file

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::application::errors::{BotError, ConfigError};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "COMPLETE-DOCUMENTATION.md";

static ANCHOR_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[&().]").expect("valid anchor pattern"));

/// Built-in document order
const BUILTIN_MANIFEST: &[(&str, &str)] = &[
    ("1. Project Overview", "README.md"),
    ("2. Build Summary", "BUILD-SUMMARY.md"),
    ("3. Master Index", "Md-files/MASTER-INDEX.md"),
    ("4. Quick Start Guide", "Md-files/QUICK-START-GUIDE.md"),
    ("5. Complete Platform Implementation", "Md-files/COMPLETE-PLATFORM-IMPLEMENTATION.md"),
    ("6. Green API Money Ideas", "Md-files/GREEN-API-MONEY-IDEAS.md"),
    ("7. Complete API Implementation", "Md-files/COMPLETE-API-IMPLEMENTATION.md"),
    ("8. Database, API & Deployment", "Md-files/DATABASE-API-DEPLOYMENT.md"),
    ("9. Message Flow Templates", "Md-files/MESSAGE-FLOW-TEMPLATES.md"),
    ("10. Admin & User Panels", "Md-files/ADMIN-USER-PANELS.md"),
    ("11. Cursor IDE Rules", "Md-files/CURSOR-RULES.md"),
    ("12. Quick Start", "QUICK-START.md"),
    ("13. WhatsApp Quick Start", "QUICK_START_WHATSAPP.md"),
    ("14. WhatsApp Integration Guide", "README_WHATSAPP.md"),
    ("15. Railway Deployment", "RAILWAY-DEPLOY.md"),
    ("16. Railway Setup", "RAILWAY-SETUP.md"),
    ("17. Railway PostgreSQL Solution", "RAILWAY-POSTGRES-SOLUTION.md"),
    ("18. Fix PostgreSQL", "FIX-POSTGRESQL.md"),
    ("19. PostgreSQL Fix Guide", "POSTGRESQL-FIX.md"),
    ("20. Deployment Steps", "DEPLOYMENT-STEPS.md"),
    ("21. Deployment Status", "DEPLOYMENT-STATUS.md"),
    ("22. GitHub + Railway Setup", "GITHUB-RAILWAY-SETUP.md"),
    ("23. Manual Deployment", "DEPLOY-MANUAL.md"),
    ("24. Deploy Now", "DEPLOY-NOW.md"),
    ("25. Quick Deploy", "QUICK-DEPLOY.md"),
    ("26. Railway Deploy (Original)", "Md-files/Railway deploy.md"),
    ("27. Backend README", "backend/README.md"),
];

/// One document in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocEntry {
    pub title: String,
    pub path: PathBuf,
}

/// Ordered list of documents to combine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<DocEntry>,
}

impl Manifest {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_MANIFEST
                .iter()
                .map(|(title, path)| DocEntry {
                    title: title.to_string(),
                    path: PathBuf::from(path),
                })
                .collect(),
        }
    }

    /// Load a YAML list of `{ title, path }` entries
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read manifest {}: {}", path.display(), e)))?;

        let manifest: Manifest = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse manifest: {}", e)))?;

        if manifest.entries.is_empty() {
            return Err(ConfigError::InvalidValue("manifest has no entries".to_string()));
        }
        Ok(manifest)
    }
}

/// GitHub-style anchor for a table of contents title
pub fn anchor(title: &str) -> String {
    let slug = title.to_lowercase().replace(' ', "-");
    ANCHOR_STRIP.replace_all(&slug, "").into_owned()
}

/// Drop a leading `# Title` line when it is followed by a blank line or a
/// bold subtitle, so the combined heading is not repeated.
pub fn strip_leading_title(content: &str) -> String {
    let content = content.trim();
    let lines: Vec<&str> = content.split('\n').collect();

    if lines.len() > 1
        && lines[0].starts_with('#')
        && (lines[1].trim().is_empty() || lines[1].starts_with("**"))
    {
        return lines[1..].join("\n").trim().to_string();
    }
    content.to_string()
}

/// Result of a combine run
#[derive(Debug, Clone)]
pub struct CombinedDocument {
    pub text: String,
    pub files_combined: usize,
}

impl CombinedDocument {
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Combines the manifest's documents found under `root`
pub struct DocsService {
    root: PathBuf,
    manifest: Manifest,
}

impl DocsService {
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            root: root.into(),
            manifest,
        }
    }

    pub fn combine(&self, generated_at: &str) -> CombinedDocument {
        let mut out: Vec<String> = vec![
            "# 📚 MuntuShop Platform - Complete Documentation".into(),
            String::new(),
            "**All Documentation Combined into One Master File**".into(),
            String::new(),
            "This document contains all markdown documentation from the MuntuShop project.".into(),
            String::new(),
            "---".into(),
            String::new(),
            "# 📑 Table of Contents".into(),
            String::new(),
        ];

        for entry in &self.manifest.entries {
            out.push(format!("- [{}](#{})", entry.title, anchor(&entry.title)));
        }
        out.extend(["", "---", ""].map(String::from));

        let mut files_combined = 0;
        for entry in &self.manifest.entries {
            let full_path = self.root.join(&entry.path);
            if !full_path.exists() {
                tracing::debug!("Skipping missing document {}", entry.path.display());
                continue;
            }
            files_combined += 1;

            out.push(format!("# {}", entry.title));
            out.push(String::new());
            out.push(format!("*Source: `{}`*", entry.path.display()));
            out.extend(["", "---", ""].map(String::from));

            match read_lossy(&full_path) {
                Ok(content) => out.push(strip_leading_title(&content)),
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", full_path.display(), e);
                    out.push(format!("*Error reading file {}: {}*", entry.path.display(), e));
                }
            }

            out.extend(["", "", "---", ""].map(String::from));
        }

        out.push(String::new());
        out.push("# End of Documentation".into());
        out.push(String::new());
        out.push(format!("*Combined from {} markdown files*", files_combined));
        out.push(format!("*Generated: {}*", generated_at));

        CombinedDocument {
            text: out.join("\n"),
            files_combined,
        }
    }

    /// Combine and write to `output`
    pub fn write(&self, output: impl AsRef<Path>, generated_at: &str) -> Result<CombinedDocument, BotError> {
        let doc = self.combine(generated_at);
        std::fs::write(output.as_ref(), &doc.text)?;
        tracing::info!(
            "Wrote {} ({} files, {} lines)",
            output.as_ref().display(),
            doc.files_combined,
            doc.line_count()
        );
        Ok(doc)
    }
}

/// Read a file as UTF-8, dropping invalid byte sequences
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(title: &str, path: &str) -> DocEntry {
        DocEntry {
            title: title.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("1. Project Overview"), "1-project-overview");
        assert_eq!(anchor("8. Database, API & Deployment"), "8-database,-api--deployment");
        assert_eq!(anchor("26. Railway Deploy (Original)"), "26-railway-deploy-original");
        assert_eq!(anchor("22. GitHub + Railway Setup"), "22-github-+-railway-setup");
    }

    #[test]
    fn test_strip_leading_title() {
        assert_eq!(strip_leading_title("# Title\n\nBody text\n"), "Body text");
        assert_eq!(strip_leading_title("# Title\n**Bold intro**\nmore"), "**Bold intro**\nmore");
        assert_eq!(strip_leading_title("# Title\nBody"), "# Title\nBody");
        assert_eq!(strip_leading_title("# Only title"), "# Only title");
        assert_eq!(strip_leading_title("Plain\n\ntext"), "Plain\n\ntext");
    }

    #[test]
    fn test_builtin_manifest() {
        let manifest = Manifest::builtin();
        assert_eq!(manifest.entries.len(), 27);
        assert_eq!(manifest.entries[0], entry("1. Project Overview", "README.md"));
        assert_eq!(manifest.entries[26].path, PathBuf::from("backend/README.md"));
    }

    #[test]
    fn test_combine_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# MuntuShop\n\nWelcome.\n").unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/deploy.md"), b"Run it\xff now").unwrap();

        let manifest = Manifest {
            entries: vec![
                entry("1. Overview", "README.md"),
                entry("2. Missing", "MISSING.md"),
                entry("3. Deploy (Railway)", "docs/deploy.md"),
            ],
        };
        let doc = DocsService::new(dir.path(), manifest).combine("Mon Oct 19 10:00:00 UTC 2026");

        assert_eq!(doc.files_combined, 2);
        assert!(doc.text.contains("- [1. Overview](#1-overview)\n- [2. Missing](#2-missing)\n"));
        assert!(doc.text.contains("- [3. Deploy (Railway)](#3-deploy-railway)"));
        assert!(doc.text.contains("# 1. Overview\n\n*Source: `README.md`*\n\n---\n\nWelcome.\n\n\n---\n"));
        assert!(!doc.text.contains("# 2. Missing"));
        assert!(doc.text.contains("Run it now"));
        assert!(doc.text.ends_with(
            "# End of Documentation\n\n*Combined from 2 markdown files*\n*Generated: Mon Oct 19 10:00:00 UTC 2026*"
        ));
    }

    #[test]
    fn test_read_lossy_keeps_real_replacement_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.md");
        let mut bytes = "Price: \u{FFFD} unknown ".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xff\xfe");
        bytes.extend_from_slice("caf\u{e9}".as_bytes());
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(read_lossy(&path).unwrap(), "Price: \u{FFFD} unknown caf\u{e9}");
    }

    #[test]
    fn test_write_creates_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "hello").unwrap();
        let output = dir.path().join("out.md");

        let service = DocsService::new(dir.path(), Manifest { entries: vec![entry("Intro", "README.md")] });
        let doc = service.write(&output, "now").unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, doc.text);
        assert_eq!(doc.line_count(), written.lines().count());
    }

    #[test]
    fn test_manifest_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.yaml");
        std::fs::write(&path, "- title: Intro\n  path: README.md\n- title: Guide\n  path: docs/guide.md\n").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.entries, vec![entry("Intro", "README.md"), entry("Guide", "docs/guide.md")]);

        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(Manifest::load(&path), Err(ConfigError::InvalidValue(_))));
    }
}
