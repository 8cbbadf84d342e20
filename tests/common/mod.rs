// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Canned engine result content: two transactions, one failed request.
/// 预制的引擎结果内容：两个事务，一个失败请求。
pub const SAMPLE_JTL: &str = "\
timeStamp,elapsed,label,responseCode,responseMessage,threadName,dataType,success,failureMessage,bytes,sentBytes,grpThreads,allThreads,URL,Latency,IdleTime,Connect
1700000000000,120,home,200,OK,Group 1-1,text,true,,512,0,1,1,http://localhost/,100,0,20
1700000000500,80,home,200,OK,Group 1-1,text,true,,512,0,1,1,http://localhost/,60,0,10
1700000001000,250,checkout,500,Internal Server Error,Group 1-2,text,false,Assertion failed,1024,0,1,1,http://localhost/checkout,230,0,15
1700000002000,90,checkout,200,OK,Group 1-2,text,true,,768,0,1,1,http://localhost/checkout,80,0,12
";

pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a stand-in for the external engine: a shell script that understands
/// the real invocation (`-n -t <plan> -l <results> -e -o <report>`) and keys
/// its behavior off the plan file name.
///
/// - a plan containing `broken` makes the engine exit non-zero
/// - a plan containing `silent` makes it exit 0 without writing results
/// - a plan containing `garbage` makes it write an unparsable result file
/// - a plan containing `slow` makes it sleep before answering
/// - anything else gets the canned result rows
pub fn create_stub_engine(dir: &Path) -> PathBuf {
    let script_path = dir.join("stub-engine.sh");
    let script = format!(
        r#"#!/bin/sh
plan=""
results=""
report=""
while [ $# -gt 0 ]; do
  case "$1" in
    -t) plan="$2"; shift 2 ;;
    -l) results="$2"; shift 2 ;;
    -o) report="$2"; shift 2 ;;
    *) shift ;;
  esac
done
case "$plan" in
  *broken*) echo "engine blew up" >&2; exit 1 ;;
  *silent*) exit 0 ;;
  *slow*) sleep 5 ;;
esac
mkdir -p "$report"
case "$plan" in
  *garbage*)
    echo "this is not a result table" > "$results"
    echo "and,these,rows,match,no,known,columns" >> "$results"
    exit 0
    ;;
esac
cat > "$results" <<'ROWS'
{SAMPLE_JTL}ROWS
exit 0
"#
    );
    fs::write(&script_path, script).expect("Failed to write stub engine");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub engine executable");
    }

    script_path
}

/// Creates one empty plan file per name under `plans_dir`.
pub fn create_plan_files(plans_dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    fs::create_dir_all(plans_dir).expect("Failed to create plans directory");
    names
        .iter()
        .map(|name| {
            let path = plans_dir.join(format!("{name}.jmx"));
            fs::write(&path, "<jmeterTestPlan/>").expect("Failed to write plan file");
            path
        })
        .collect()
}

/// Writes a batch configuration pointing at the stub engine.
pub fn write_config(
    dir: &Path,
    engine_bin: &Path,
    plans_dir: &Path,
    results_dir: &Path,
) -> PathBuf {
    let config_path = dir.join("BatchConfig.toml");
    let content = format!(
        r#"engine_home = "{}"
engine_bin = "{}"
plans_dir = "{}"
results_dir = "{}"
jobs = 2
"#,
        dir.display(),
        engine_bin.display(),
        plans_dir.display(),
        results_dir.display(),
    );
    fs::write(&config_path, content).expect("Failed to write config file");
    config_path
}
