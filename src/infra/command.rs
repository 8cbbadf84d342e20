//! # Process Capture Module / 进程捕获模块
//!
//! Spawning of the external engine process with combined stdout/stderr
//! capture. The engine is supervised as a black box: the caller only sees the
//! exit status and the captured text.
//!
//! 以合并捕获标准输出/错误的方式启动外部引擎进程。
//! 引擎作为黑盒被监督：调用方只看到退出状态和捕获的文本。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Spawns a command and drains its stdout and stderr concurrently while
/// waiting for it to exit.
///
/// Returns the exit status (an `Err` when the process could not be spawned or
/// waited on) together with the captured output, stdout first. Both streams
/// are drained to completion even when the process exits early, so no output
/// is lost to a closed pipe.
///
/// 启动一个命令，在等待其退出的同时并发读空其标准输出和标准错误。
/// 返回退出状态（无法启动或等待时为 `Err`）以及捕获的输出，标准输出在前。
/// 即使进程提前退出，两个流也会被完整读空，不会因管道关闭而丢失输出。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<ExitStatus>, String) {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (status, out, err) = tokio::join!(child.wait(), drain(stdout), drain(stderr));

    let mut combined = out;
    if !err.is_empty() {
        combined.push_str(&err);
    }

    (status, combined)
}

/// Reads a pipe line by line into a string until it closes.
/// 逐行读取管道内容到字符串，直到其关闭。
async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let mut lines = BufReader::new(pipe).lines();
    let mut buf = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        buf.push_str(&line);
        buf.push('\n');
    }
    buf
}
