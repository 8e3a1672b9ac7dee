use std::path::PathBuf;

use crate::data::TokenId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub token: Option<TokenId>,
    pub data: Option<PathBuf>,
    pub delay_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: i32,
    pub message: String,
}

impl ParseError {
    fn usage(message: String) -> Self {
        Self {
            code: 2,
            message: format!("{message}\n\n{}", help_text(env!("CARGO_PKG_NAME"))),
        }
    }
}

#[must_use]
pub fn help_text(bin_name: &str) -> String {
    indoc::formatdoc!(
        "
            Token Detail

            用法：
              {bin_name} [选项]

            选项：
              -h, --help           显示帮助信息
              -V, --version        显示版本信息
                  --token <ID>     初始代币 ID（默认 1）
                  --data <PATH>    从 JSON 文件加载代币数据
                  --delay-ms <MS>  模拟的解析延迟（毫秒）
        ",
        bin_name = bin_name
    )
}

#[must_use]
pub fn version_text() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub fn parse_args<I, S>(args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = Args::default();
    let mut show_help = false;
    let mut show_version = false;

    let mut args = args.into_iter().map(|arg| -> String { arg.into() });
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ParseError::usage(format!("选项缺少参数：{name}")))
        };

        match flag.as_str() {
            "-h" | "--help" => show_help = true,
            "-V" | "--version" => show_version = true,
            "--token" => {
                let token = value("--token")?;
                if token.trim().is_empty() {
                    return Err(ParseError::usage("代币 ID 不能为空".to_string()));
                }
                parsed.token = Some(TokenId::from(token.trim().to_string()));
            }
            "--data" => parsed.data = Some(PathBuf::from(value("--data")?)),
            "--delay-ms" => {
                let raw = value("--delay-ms")?;
                let ms = raw
                    .parse::<u64>()
                    .map_err(|_| ParseError::usage(format!("无效的延迟：{raw}")))?;
                parsed.delay_ms = Some(ms);
            }
            _ if arg.starts_with('-') => {
                return Err(ParseError::usage(format!("未知选项：{arg}")));
            }
            _ => {
                return Err(ParseError::usage(format!("不支持的位置参数：{arg}")));
            }
        }
    }

    if show_help {
        return Ok(Command::Help);
    }

    if show_version {
        return Ok(Command::Version);
    }

    Ok(Command::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Args, Command};
    use crate::data::TokenId;
    use std::path::PathBuf;

    #[test]
    fn parses_default_run_command() {
        let result = parse_args(Vec::<String>::new());
        assert_eq!(result, Ok(Command::Run(Args::default())));
    }

    #[test]
    fn parses_help_command() {
        assert_eq!(parse_args(["--help"]), Ok(Command::Help));
        assert_eq!(parse_args(["-h", "--token", "1"]), Ok(Command::Help));
    }

    #[test]
    fn parses_version_command() {
        assert_eq!(parse_args(["-V"]), Ok(Command::Version));
    }

    #[test]
    fn parses_run_options() {
        let result = parse_args(["--token", "2", "--data=tokens.json", "--delay-ms", "0"]);
        assert_eq!(
            result,
            Ok(Command::Run(Args {
                token: Some(TokenId::new("2")),
                data: Some(PathBuf::from("tokens.json")),
                delay_ms: Some(0),
            }))
        );
    }

    #[test]
    fn fails_on_missing_value() {
        let err = parse_args(["--token"]).expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("缺少参数"));
    }

    #[test]
    fn fails_on_invalid_delay() {
        let err = parse_args(["--delay-ms", "soon"]).expect_err("expected parse error");
        assert!(err.message.contains("无效的延迟"));
    }

    #[test]
    fn fails_on_unknown_option() {
        let err = parse_args(["--unknown"]).expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("未知选项"));
    }

    #[test]
    fn fails_on_positional_argument() {
        let err = parse_args(["abc"]).expect_err("expected parse error");
        assert!(err.message.contains("不支持的位置参数"));
    }
}
