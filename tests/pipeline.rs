#![cfg(unix)]

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use dochameleon::config::config::Mode;
use dochameleon::config::ports::{AppConfig, ConversionPort, ToolConfig};
use dochameleon::error::ErrorKind;
use dochameleon::facade::conversion_facade::ConversionFacade;
use dochameleon::facade::traits::i_conversion::ConversionFacadeTrait;
use dochameleon::models::conversion::ConversionRequest;
use dochameleon::service::runner::ConversionRunner;
use tempfile::{tempdir, TempDir};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// 模擬 pdflatex：依 -output-directory 寫出 PDF 與輔助檔，內容含 FAIL 時寫錯誤日誌並失敗
const FAKE_LATEX: &str = r#"#!/bin/sh
out=.
for arg in "$@"; do
  case "$arg" in
    -output-directory=*) out="${arg#-output-directory=}" ;;
  esac
  src="$arg"
done
stem=$(basename "$src" .tex)
if grep -q FAIL "$src"; then
  printf '! Undefined control sequence.\nl.3 \\foo\n' > "$out/$stem.log"
  exit 1
fi
echo aux > "$out/$stem.aux"
echo log > "$out/$stem.log"
printf '%%PDF-1.5 %s\n' "$stem" > "$out/$stem.pdf"
"#;

struct Fixture {
    dir: TempDir,
    tools: ToolConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        fs::create_dir(&bin).unwrap();

        let template = bin.join("template.docx");
        let mut zip = ZipWriter::new(File::create(&template).unwrap());
        zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<w:document/>").unwrap();
        zip.finish().unwrap();

        let latex = write_script(&bin, "fake-latex", FAKE_LATEX);
        let pdf2docx = write_script(
            &bin,
            "fake-pdf2docx",
            &format!(
                "#!/bin/sh\ntouch '{marker}'\n[ \"$1\" = convert ] || exit 2\ncp '{template}' \"$3\"\n",
                marker = bin.join("pdf2docx.ran").display(),
                template = template.display()
            ),
        );

        let tools = ToolConfig {
            latex_engine: latex.display().to_string(),
            latex_passes: 2,
            pdf2docx_program: pdf2docx.display().to_string(),
            ..ToolConfig::default()
        };
        Fixture { dir, tools }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn facade(&self) -> ConversionFacade {
        ConversionFacade::from_tools(&self.tools)
    }

    fn pdf2docx_ran(&self) -> bool {
        self.path("bin").join("pdf2docx.ran").exists()
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn tex2pdf_creates_nested_output_and_cleans_auxiliary_files() {
    let fx = Fixture::new();
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let out = fx.path("build").join("pdf");

    let result = fx.facade().execute_conversion(&ConversionRequest::new(Mode::Tex2pdf, &input, &out));

    assert!(result.success, "{:?}", result.error_message);
    assert_eq!(entries(&out), vec!["paper.pdf"]);
    assert!(input.exists());
}

#[test]
fn tex2docx_runs_both_tools_and_discards_intermediate_pdf() {
    let fx = Fixture::new();
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let out = fx.path("out");

    let result = fx.facade().execute_conversion(&ConversionRequest::new(Mode::Tex2docx, &input, &out));

    assert!(result.success, "{:?}", result.error_message);
    assert!(fx.pdf2docx_ran());
    assert_eq!(entries(&out), vec!["paper.docx"]);
}

#[test]
fn tex2docx_keeps_intermediate_when_asked() {
    let fx = Fixture::new();
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let out = fx.path("out");

    let request = ConversionRequest::new(Mode::Tex2docx, &input, &out).keep_intermediate(true);
    let result = fx.facade().execute_conversion(&request);

    assert!(result.success, "{:?}", result.error_message);
    assert_eq!(entries(&out), vec!["paper.docx", "paper.pdf"]);
}

#[test]
fn latex_failure_never_reaches_pdf2docx() {
    let fx = Fixture::new();
    let input = fx.source("broken.tex", "FAIL \\foo");
    let out = fx.path("out");

    let result = fx.facade().execute_conversion(&ConversionRequest::new(Mode::Tex2docx, &input, &out));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ExternalTool));
    assert!(result.error_message.unwrap().contains("Undefined control sequence"));
    assert!(!fx.pdf2docx_ran());
    assert!(entries(&out).iter().all(|name| !name.ends_with(".docx")));
}

#[test]
fn invalid_docx_output_is_rejected_and_removed() {
    let fx = Fixture::new();
    let bin = fx.path("bin");
    let broken = write_script(&bin, "broken-pdf2docx", "#!/bin/sh\necho garbage > \"$3\"\n");
    let facade = ConversionFacade::from_tools(&ToolConfig {
        pdf2docx_program: broken.display().to_string(),
        ..fx.tools.clone()
    });
    let input = fx.source("scan.pdf", "%PDF-1.4");
    let out = fx.path("out");

    let result = facade.execute_conversion(&ConversionRequest::new(Mode::Pdf2docx, &input, &out));

    assert_eq!(result.error_kind, Some(ErrorKind::ExternalTool));
    assert!(!out.join("scan.docx").exists());
}

#[test]
fn missing_tool_fails_before_output_dir_is_created() {
    let fx = Fixture::new();
    let facade = ConversionFacade::from_tools(&ToolConfig {
        latex_engine: "dochameleon-no-such-latex".to_string(),
        ..fx.tools.clone()
    });
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let out = fx.path("out");

    let result = facade.execute_conversion(&ConversionRequest::new(Mode::Tex2pdf, &input, &out));

    assert_eq!(result.error_kind, Some(ErrorKind::ExternalTool));
    assert!(!out.exists());
}

#[test]
fn missing_input_fails_before_output_dir_is_created() {
    let fx = Fixture::new();
    let out = fx.path("out");

    let result = fx
        .facade()
        .execute_conversion(&ConversionRequest::new(Mode::Pdf2docx, fx.path("ghost.pdf"), &out));

    assert_eq!(result.error_kind, Some(ErrorKind::InvalidInput));
    assert!(!out.exists());
}

#[cfg(not(windows))]
#[test]
fn docx2pdf_is_unsupported_without_word() {
    let fx = Fixture::new();
    let input = fx.source("letter.docx", "PK");
    let out = fx.path("out");

    let result = fx.facade().execute_conversion(&ConversionRequest::new(Mode::Docx2pdf, &input, &out));

    assert_eq!(result.error_kind, Some(ErrorKind::UnsupportedPlatform));
    assert!(!out.exists());
}

#[test]
fn repeated_conversion_is_byte_identical() {
    let fx = Fixture::new();
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let facade = fx.facade();

    let first = facade.execute_conversion(&ConversionRequest::new(Mode::Tex2docx, &input, fx.path("one")));
    let second = facade.execute_conversion(&ConversionRequest::new(Mode::Tex2docx, &input, fx.path("two")));

    assert_eq!(
        fs::read(first.output_path.unwrap()).unwrap(),
        fs::read(second.output_path.unwrap()).unwrap()
    );
}

#[test]
fn directory_batch_reports_each_file() {
    let fx = Fixture::new();
    let docs = fx.path("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("a.tex"), "ok").unwrap();
    fs::write(docs.join("b.tex"), "FAIL").unwrap();
    fs::write(docs.join("c_style.tex"), "ok").unwrap();
    let out = fx.path("out");

    let mut config = AppConfig::new(Mode::Tex2pdf, docs.display().to_string(), Some(out.display().to_string()));
    config.tools = fx.tools.clone();
    config.no_progress = true;

    let summary = ConversionRunner::from_config(&config).execute(config).unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(entries(&out), vec!["a.pdf"]);
}

#[test]
fn stale_pdf_does_not_mask_a_latex_run_without_output() {
    let fx = Fixture::new();
    let silent = write_script(&fx.path("bin"), "silent-latex", "#!/bin/sh\necho 'No pages of output.'\nexit 0\n");
    let facade = ConversionFacade::from_tools(&ToolConfig {
        latex_engine: silent.display().to_string(),
        ..fx.tools.clone()
    });
    let input = fx.source("paper.tex", "\\documentclass{article}");
    let out = fx.path("out");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("paper.pdf"), "%PDF-1.5 from last week").unwrap();

    let result = facade.execute_conversion(&ConversionRequest::new(Mode::Tex2pdf, &input, &out));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ExternalTool));
    assert!(!out.join("paper.pdf").exists());
}

#[test]
fn stale_docx_does_not_mask_a_pdf2docx_run_without_output() {
    let fx = Fixture::new();
    let silent = write_script(&fx.path("bin"), "silent-pdf2docx", "#!/bin/sh\nexit 0\n");
    let facade = ConversionFacade::from_tools(&ToolConfig {
        pdf2docx_program: silent.display().to_string(),
        ..fx.tools.clone()
    });
    let input = fx.source("scan.pdf", "%PDF-1.4");
    let out = fx.path("out");
    fs::create_dir(&out).unwrap();
    fs::copy(fx.path("bin").join("template.docx"), out.join("scan.docx")).unwrap();

    let result = facade.execute_conversion(&ConversionRequest::new(Mode::Pdf2docx, &input, &out));

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(ErrorKind::ExternalTool));
    assert!(!out.join("scan.docx").exists());
}

#[test]
fn pdf2docx_receives_layout_parameters() {
    let fx = Fixture::new();
    let bin = fx.path("bin");
    let recorder = write_script(
        &bin,
        "recording-pdf2docx",
        &format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{args}'\ncp '{template}' \"$3\"\n",
            args = bin.join("args.txt").display(),
            template = bin.join("template.docx").display()
        ),
    );
    let facade = ConversionFacade::from_tools(&ToolConfig {
        pdf2docx_program: recorder.display().to_string(),
        ..fx.tools.clone()
    });
    let input = fx.source("scan.pdf", "%PDF-1.4");

    let result = facade.execute_conversion(&ConversionRequest::new(Mode::Pdf2docx, &input, fx.path("out")));

    assert!(result.success, "{:?}", result.error_message);
    let args = fs::read_to_string(bin.join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "convert");
    assert!(args.contains(&"--connected_border_tolerance=1.0"));
    assert!(args.contains(&"--page_margin_factor_bottom=0.0"));
}

#[test]
fn recursive_batch_rejects_colliding_output_names() {
    let fx = Fixture::new();
    let docs = fx.path("docs");
    fs::create_dir_all(docs.join("ch2")).unwrap();
    fs::write(docs.join("intro.tex"), "top level").unwrap();
    fs::write(docs.join("ch2").join("intro.tex"), "chapter two").unwrap();
    let out = fx.path("out");

    let mut config = AppConfig::new(Mode::Tex2pdf, docs.display().to_string(), Some(out.display().to_string()));
    config.tools = fx.tools.clone();
    config.recursive = true;
    config.no_progress = true;

    let summary = ConversionRunner::from_config(&config).execute(config).unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    let rejected = summary.results.iter().find(|r| !r.success).unwrap();
    assert_eq!(rejected.error_kind, Some(ErrorKind::InvalidInput));
    assert_eq!(entries(&out), vec!["intro.pdf"]);
}
