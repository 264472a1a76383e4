//! 动作请求解析
//!
//! 推理服务的动作请求有两种互不兼容的文本编码，按固定优先级依次尝试：
//! 1. 经典行格式 `Action: 工具(參數)`
//! 2. 类 OpenAI/LiteLLM 的工具调用标记，例如
//!    `<|channel|>commentary to=tool name=查詢開放狀態 <|constrain|>json<|message|>{"place":"美泉宮"}`
//!
//! 两种都不匹配时返回 None，由循环按可恢复事件处理；本模块不产生错误。

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// 从回应中识别出的动作请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInvocation {
    pub name: String,
    pub argument: String,
}

/// 依固定优先级解析动作：先行格式，后 metadata 标记
pub fn parse_action(response: &str) -> Option<ActionInvocation> {
    parse_action_line(response).or_else(|| parse_tool_metadata(response))
}

fn action_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Action:\s*([^\(]+)\((.*?)\)").unwrap())
}

/// 经典 ReAct 行格式：Action: 工具(參數)；参数剥掉一层成对引号
fn parse_action_line(response: &str) -> Option<ActionInvocation> {
    let caps = action_line_re().captures(response)?;
    let name = caps.get(1)?.as_str().trim().to_string();
    let argument = strip_quotes(caps.get(2)?.as_str()).to_string();
    if name.is_empty() {
        return None;
    }
    Some(ActionInvocation { name, argument })
}

fn tool_metadata_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)to=tool\s+name=(\S+).*?<\|message\|>(\{.*?\})").unwrap()
    })
}

/// 工具调用标记格式：`to=tool name=<action>` 后跟 `<|message|>` 与 JSON 负载
///
/// JSON 解析失败时去掉负载内的换行再试一次；参数栏位按动作名查固定对照表。
fn parse_tool_metadata(response: &str) -> Option<ActionInvocation> {
    let caps = tool_metadata_re().captures(response)?;
    let name = caps.get(1)?.as_str().trim().to_string();
    let raw_payload = caps.get(2)?.as_str().trim();

    let payload: Value = match serde_json::from_str(raw_payload) {
        Ok(v) => v,
        Err(_) => {
            let compact: String = raw_payload.replace(['\n', '\r'], "");
            serde_json::from_str(&compact).ok()?
        }
    };

    // 参数栏位对照表：查天氣读 city，其余（含查詢開放狀態）读 place
    let field = match name.as_str() {
        "查天氣" => "city",
        _ => "place",
    };

    let argument: String = payload
        .get(field)?
        .as_str()?
        .replace(['\n', '\r'], "")
        .trim()
        .to_string();
    if argument.is_empty() {
        return None;
    }
    Some(ActionInvocation { name, argument })
}

/// 剥掉一层成对的引号（" 或 '）
fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// 从文本中提取 JSON 块
///
/// 优先级固定：去掉代码围栏，找第一个 `[` 或 `{`，再找最后一个对应的 `]` 或 `}`，
/// 返回其间的切片；能否解析由调用方决定，找不到括号返回 None。
pub fn extract_json_block(text: &str) -> Option<String> {
    let s = strip_code_fence(text);

    let open_sq = s.find('[');
    let open_br = s.find('{');
    let (open_idx, close_ch) = match (open_sq, open_br) {
        (Some(a), Some(b)) if a < b => (a, ']'),
        (Some(a), None) => (a, ']'),
        (_, Some(b)) => (b, '}'),
        (None, None) => return None,
    };

    let close_idx = s.rfind(close_ch)?;
    if close_idx <= open_idx {
        return None;
    }
    Some(s[open_idx..=close_idx].to_string())
}

/// 去掉包裹整段的 ``` 围栏（含 ```json 语言标记行）
fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();
    if s.starts_with("```") {
        s = match s.find('\n') {
            Some(i) => &s[i + 1..],
            None => &s[3..],
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_line_basic() {
        let parsed = parse_action("Thought: 先查天氣\nAction: 查天氣(台北)").unwrap();
        assert_eq!(parsed.name, "查天氣");
        assert_eq!(parsed.argument, "台北");
    }

    #[test]
    fn test_action_line_strips_one_quote_layer() {
        let parsed = parse_action(r#"Action: 查詢開放狀態("美泉宮")"#).unwrap();
        assert_eq!(parsed.argument, "美泉宮");

        let parsed = parse_action("Action: 查詢開放狀態('美泉宮')").unwrap();
        assert_eq!(parsed.argument, "美泉宮");

        // 只剥一层
        let parsed = parse_action(r#"Action: 查詢開放狀態(""美泉宮"")"#).unwrap();
        assert_eq!(parsed.argument, r#""美泉宮""#);
    }

    #[test]
    fn test_tool_metadata_form() {
        let response = concat!(
            "<|channel|>commentary to=tool name=查詢開放狀態 ",
            "<|constrain|>json<|message|>{\"place\":\"美泉宮\"}"
        );
        let parsed = parse_action(response).unwrap();
        assert_eq!(parsed.name, "查詢開放狀態");
        assert_eq!(parsed.argument, "美泉宮");
    }

    #[test]
    fn test_tool_metadata_weather_reads_city_field() {
        let response = "to=tool name=查天氣 <|message|>{\"city\":\"維也納\"}";
        let parsed = parse_action(response).unwrap();
        assert_eq!(parsed.name, "查天氣");
        assert_eq!(parsed.argument, "維也納");
    }

    #[test]
    fn test_tool_metadata_lenient_json_retry() {
        // 负载内嵌换行，首次解析失败，去换行后重试成功
        let response = "to=tool name=查詢開放狀態 <|message|>{\"place\":\"美泉\n宮\"}";
        let parsed = parse_action(response).unwrap();
        assert_eq!(parsed.argument, "美泉宮");
    }

    #[test]
    fn test_tool_metadata_wrong_field_is_no_match() {
        let response = "to=tool name=查天氣 <|message|>{\"place\":\"維也納\"}";
        assert!(parse_action(response).is_none());
    }

    #[test]
    fn test_line_format_takes_priority() {
        let response = concat!(
            "Action: 查天氣(台北)\n",
            "to=tool name=查詢開放狀態 <|message|>{\"place\":\"美泉宮\"}"
        );
        let parsed = parse_action(response).unwrap();
        assert_eq!(parsed.name, "查天氣");
    }

    #[test]
    fn test_neither_form_is_none() {
        assert!(parse_action("Thought: 我還在思考下一步。").is_none());
        assert!(parse_action("").is_none());
    }

    #[test]
    fn test_extract_json_block_plain_array() {
        let block = extract_json_block(r#"[{"place":"美泉宮","minutes":120}]"#).unwrap();
        assert_eq!(block, r#"[{"place":"美泉宮","minutes":120}]"#);
    }

    #[test]
    fn test_extract_json_block_with_fence_and_prose() {
        let text = "好的，行程如下：\n```json\n[{\"place\":\"美泉宮\",\"minutes\":120}]\n```";
        let block = extract_json_block(text).unwrap();
        assert_eq!(block, r#"[{"place":"美泉宮","minutes":120}]"#);
    }

    #[test]
    fn test_extract_json_block_nested_brackets() {
        let text = r#"說明 [見附註] 之後才是行程 [{"place":"美泉宮","minutes":120}]"#;
        let block = extract_json_block(text).unwrap();
        // 第一个 [ 到最后一个 ]；解析失败由调用方降级
        assert!(block.starts_with("[見附註]"));
        assert!(block.ends_with("]"));
    }

    #[test]
    fn test_extract_json_block_object_form() {
        let block = extract_json_block("結果：{\"place\":\"美泉宮\"} 以上").unwrap();
        assert_eq!(block, r#"{"place":"美泉宮"}"#);
    }

    #[test]
    fn test_extract_json_block_none_without_brackets() {
        assert!(extract_json_block("沒有任何結構化內容").is_none());
        assert!(extract_json_block("只有一半 [").is_none());
    }
}
