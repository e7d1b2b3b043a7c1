//! The single call into the engine.

use std::path::PathBuf;

use log::{debug, info};

use crate::error::Result;
use crate::include::SourceUnit;
use crate::translator::{JobResult, Translator, TranslatorConfig};

/// Push `config` into `translator` and run it exactly once. No retries.
pub fn execute(translator: &mut dyn Translator, config: &TranslatorConfig) -> Result<JobResult> {
    add_sources(translator, &config.sources);

    if let Some(dir) = &config.destination.directory {
        translator.set_destination_directory(dir);
    }
    if let Some(jar) = &config.destination.archive {
        translator.set_destination_archive(jar);
    }

    translator.set_verbose(config.verbose);
    translator.set_strip_signatures(config.strip_signatures);
    translator.set_lazy(config.lazy);
    translator.set_verify(config.verify);
    translator.set_advanced(config.advanced);
    translator.set_retain_api(config.retain_api);
    translator.set_retain_flags(config.retain_flags);

    if let Some(mask) = &config.source_mask {
        translator.set_source_mask(mask);
    }
    if let Some(embed) = &config.embed {
        translator.set_embed(embed);
    }
    if let Some(backport) = &config.backport {
        translator.set_backport(backport);
    }
    if let Some(target) = &config.target {
        translator.set_target(target);
    }

    for element in config.classpath.iter().chain(&config.verify_classpath) {
        translator.add_classpath_element(element);
    }

    info!(
        "Translating {} input(s) with {} classpath element(s)",
        config.sources.len(),
        config.classpath.len() + config.verify_classpath.len()
    );
    let verified = translator.run()?;
    debug!("Engine reported verified={}", verified);
    Ok(JobResult { verified })
}

/// Runs of individual files sharing a base become one `add_source_files` call.
fn add_sources(translator: &mut dyn Translator, sources: &[SourceUnit]) {
    let mut pending: Option<(PathBuf, Vec<PathBuf>)> = None;

    for unit in sources {
        match unit {
            SourceUnit::File { base, relative } => {
                if let Some((current, files)) = pending.as_mut() {
                    if *current == *base {
                        files.push(relative.clone());
                        continue;
                    }
                }
                flush(translator, pending.take());
                pending = Some((base.clone(), vec![relative.clone()]));
            }
            SourceUnit::Directory(path) => {
                flush(translator, pending.take());
                translator.add_source_directory(path);
            }
            SourceUnit::Archive(path) => {
                flush(translator, pending.take());
                translator.add_source_archive(path);
            }
        }
    }
    flush(translator, pending);
}

fn flush(translator: &mut dyn Translator, group: Option<(PathBuf, Vec<PathBuf>)>) {
    if let Some((base, files)) = group {
        translator.add_source_files(&base, &files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{Destination, EngineCall, RecordingTranslator};

    fn config() -> TranslatorConfig {
        TranslatorConfig {
            strip_signatures: false,
            verbose: false,
            verify: false,
            lazy: false,
            fail_on_warning: true,
            advanced: false,
            retain_api: false,
            retain_flags: false,
            target: None,
            embed: None,
            backport: None,
            source_mask: None,
            classpath: Vec::new(),
            verify_classpath: Vec::new(),
            sources: Vec::new(),
            destination: Destination::default(),
        }
    }

    fn file(base: &str, rel: &str) -> SourceUnit {
        SourceUnit::File {
            base: PathBuf::from(base),
            relative: PathBuf::from(rel),
        }
    }

    #[test]
    fn test_runs_exactly_once() {
        let mut engine = RecordingTranslator::verified();
        let result = execute(&mut engine, &config()).unwrap();
        assert!(result.verified);
        assert_eq!(engine.run_count(), 1);
        assert_eq!(engine.calls().last(), Some(&EngineCall::Run));
    }

    #[test]
    fn test_failed_run_is_not_retried() {
        let mut engine = RecordingTranslator::failing("boom");
        assert!(execute(&mut engine, &config()).is_err());
        assert_eq!(engine.run_count(), 1);
    }

    #[test]
    fn test_absent_strings_never_reach_engine() {
        let mut engine = RecordingTranslator::verified();
        execute(&mut engine, &config()).unwrap();
        assert!(!engine.has_call(|c| matches!(
            c,
            EngineCall::Target(_) | EngineCall::Embed(_) | EngineCall::Backport(_) | EngineCall::SourceMask(_)
        )));
        assert!(!engine.has_call(|c| matches!(
            c,
            EngineCall::DestinationDirectory(_) | EngineCall::DestinationArchive(_)
        )));
    }

    #[test]
    fn test_present_strings_and_all_booleans_are_set() {
        let mut cfg = config();
        cfg.target = Some("1.5".to_string());
        cfg.backport = Some("com.acme.backport".to_string());
        cfg.verify = true;

        let mut engine = RecordingTranslator::verified();
        execute(&mut engine, &cfg).unwrap();

        assert!(engine.has_call(|c| *c == EngineCall::Target("1.5".to_string())));
        assert!(engine.has_call(|c| *c == EngineCall::Backport("com.acme.backport".to_string())));
        assert!(engine.has_call(|c| *c == EngineCall::Verify(true)));
        assert!(engine.has_call(|c| *c == EngineCall::Lazy(false)));
        assert!(engine.has_call(|c| *c == EngineCall::RetainFlags(false)));
    }

    #[test]
    fn test_file_runs_grouped_by_base_in_order() {
        let mut cfg = config();
        cfg.sources = vec![
            file("/a", "A.class"),
            file("/a", "B.class"),
            SourceUnit::Archive(PathBuf::from("/lib/x.jar")),
            file("/a", "C.class"),
            file("/b", "D.class"),
            SourceUnit::Directory(PathBuf::from("/classes")),
        ];

        let mut engine = RecordingTranslator::verified();
        execute(&mut engine, &cfg).unwrap();

        let sources: Vec<_> = engine
            .calls()
            .iter()
            .take_while(|c| {
                matches!(
                    c,
                    EngineCall::SourceFiles { .. } | EngineCall::SourceArchive(_) | EngineCall::SourceDirectory(_)
                )
            })
            .cloned()
            .collect();

        assert_eq!(
            sources,
            vec![
                EngineCall::SourceFiles {
                    base: PathBuf::from("/a"),
                    relative: vec![PathBuf::from("A.class"), PathBuf::from("B.class")],
                },
                EngineCall::SourceArchive(PathBuf::from("/lib/x.jar")),
                EngineCall::SourceFiles {
                    base: PathBuf::from("/a"),
                    relative: vec![PathBuf::from("C.class")],
                },
                EngineCall::SourceFiles {
                    base: PathBuf::from("/b"),
                    relative: vec![PathBuf::from("D.class")],
                },
                EngineCall::SourceDirectory(PathBuf::from("/classes")),
            ]
        );
    }

    #[test]
    fn test_classpath_then_verify_classpath() {
        let mut cfg = config();
        cfg.classpath = vec![PathBuf::from("/lib/a.jar")];
        cfg.verify_classpath = vec![PathBuf::from("/jre14/rt.jar")];

        let mut engine = RecordingTranslator::verified();
        execute(&mut engine, &cfg).unwrap();

        let elements: Vec<_> = engine
            .calls()
            .iter()
            .filter_map(|c| match c {
                EngineCall::ClasspathElement(p) => Some(p.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(elements, vec![PathBuf::from("/lib/a.jar"), PathBuf::from("/jre14/rt.jar")]);
    }
}
