use std::fs;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use intake_audit::{ResourceKind, audit_events};
use intake_core::config::{EngineConfig, write_json_atomic};
use intake_forms::FormDefinition;
use intake_quiz::QuizDefinition;
use intake_render::{RenderMode, SchemaView, render_form, render_quiz};
use intake_schema::{Mutation, MutationReport, Schema, SchemaItem};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::{ApplyArgs, CheckArgs, KindArg, PreviewArgs};

/// A definition loaded from disk, with engine policy applied.
#[derive(Debug, Clone)]
pub enum Definition {
    Form(FormDefinition),
    Quiz(QuizDefinition),
}

impl Definition {
    pub fn load(path: &Path, kind: KindArg, config: &EngineConfig) -> eyre::Result<Self> {
        let definition = match kind {
            KindArg::Form => {
                let mut form: FormDefinition = read_json(path)?;
                form.configure(config);
                Definition::Form(form)
            }
            KindArg::Quiz => {
                let mut quiz: QuizDefinition = read_json(path)?;
                quiz.configure(config);
                Definition::Quiz(quiz)
            }
        };
        tracing::debug!(path = %path.display(), items = definition.len(), "definition loaded");
        Ok(definition)
    }

    pub fn title(&self) -> &str {
        match self {
            Definition::Form(form) => &form.title,
            Definition::Quiz(quiz) => &quiz.title,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Definition::Form(form) => form.fields.len(),
            Definition::Quiz(quiz) => quiz.questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Definition::Form(_) => ResourceKind::Form,
            Definition::Quiz(_) => ResourceKind::Quiz,
        }
    }

    pub fn issues(&self, config: &EngineConfig) -> Vec<String> {
        match self {
            Definition::Form(form) => form.issues().iter().map(ToString::to_string).collect(),
            Definition::Quiz(quiz) => quiz
                .finalized(config)
                .issues(config)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    pub fn render(&self, mode: RenderMode) -> SchemaView {
        match self {
            Definition::Form(form) => render_form(form, mode),
            Definition::Quiz(quiz) => render_quiz(quiz, mode),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub kind: ResourceKind,
    pub title: String,
    pub items: usize,
    pub issues: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn run_check(args: &CheckArgs, config: &EngineConfig) -> eyre::Result<CheckReport> {
    let definition = Definition::load(&args.file, args.kind, config)?;
    let report = CheckReport {
        kind: definition.resource_kind(),
        title: definition.title().to_string(),
        items: definition.len(),
        issues: definition.issues(config),
    };
    if !report.is_ok() {
        tracing::warn!(issues = report.issues.len(), "definition has issues");
    }
    Ok(report)
}

pub fn run_preview(args: &PreviewArgs, config: &EngineConfig) -> eyre::Result<SchemaView> {
    let definition = Definition::load(&args.file, args.kind, config)?;
    Ok(definition.render(args.mode.into()))
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub outcomes: Vec<MutationReport>,
    pub version: u64,
    pub audited: usize,
    pub saved_to: PathBuf,
}

/// Apply every mutation in order, audit the applied ones, then save.
///
/// The first failing mutation aborts the run before anything is written.
pub fn run_apply(args: &ApplyArgs, config: &EngineConfig) -> eyre::Result<ApplyReport> {
    let out = args.out.clone().unwrap_or_else(|| args.file.clone());
    let resource_id = args
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (outcomes, version, events, kind) =
        match Definition::load(&args.file, args.kind, config)? {
            Definition::Form(mut form) => {
                let outcomes = apply_all(&mut form.fields, read_json(&args.mutations)?)?;
                let events = form.fields.drain_events();
                form.save(|form| -> eyre::Result<()> {
                    write_json_atomic(&out, form)?;
                    Ok(())
                })?;
                (outcomes, form.fields.version(), events, ResourceKind::Form)
            }
            Definition::Quiz(mut quiz) => {
                let outcomes = apply_all(&mut quiz.questions, read_json(&args.mutations)?)?;
                let events = quiz.questions.drain_events();
                quiz.save(config, |quiz| -> eyre::Result<()> {
                    write_json_atomic(&out, quiz)?;
                    Ok(())
                })?;
                (outcomes, quiz.questions.version(), events, ResourceKind::Quiz)
            }
        };

    let records = audit_events(events, kind, &resource_id, &args.actor)?;
    for record in &records {
        record.emit();
    }

    Ok(ApplyReport {
        outcomes,
        version,
        audited: records.len(),
        saved_to: out,
    })
}

fn apply_all<I: SchemaItem>(
    schema: &mut Schema<I>,
    mutations: Vec<Mutation<I>>,
) -> eyre::Result<Vec<MutationReport>> {
    mutations
        .into_iter()
        .enumerate()
        .map(|(index, mutation)| {
            schema
                .apply(mutation)
                .wrap_err_with(|| format!("mutation #{index} failed"))
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let contents =
        fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("failed to parse {}", path.display()))
}
