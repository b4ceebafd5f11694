use serde_json::Value;

/// Shown in raw mode when the trimmed body is empty.
const EMPTY_BODY: &str = "<empty body>";
/// Shown in parsed mode when the body is not JSON and trims to nothing.
const NON_JSON_BODY: &str = "<non-JSON body>";

/// Renders a response body as a single display line.
///
/// With `raw` set the body is trimmed and printed as-is. Otherwise JSON
/// objects and arrays are re-serialized compactly in their original member
/// order, JSON scalars print as their value, and anything that fails to parse
/// falls back to the trimmed text.
#[must_use]
pub fn format_body(body: &str, raw: bool) -> String {
    if raw {
        return render_text(body, EMPTY_BODY);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value.to_string(),
        Ok(Value::String(text)) => single_line(&text),
        Ok(scalar) => scalar.to_string(),
        Err(_) => render_text(body, NON_JSON_BODY),
    }
}

fn render_text(body: &str, placeholder: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        placeholder.to_owned()
    } else {
        single_line(trimmed)
    }
}

fn single_line(text: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text.to_owned();
    }
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(body: &str, raw: bool, expected: &str) -> Result<(), String> {
        let rendered = format_body(body, raw);
        if rendered == expected {
            Ok(())
        } else {
            Err(format!(
                "format_body({:?}, raw={}) = {:?}, expected {:?}",
                body, raw, rendered, expected
            ))
        }
    }

    #[test]
    fn parsed_object_is_compacted() -> Result<(), String> {
        check("{\"color\":\"blue\"}", false, "{\"color\":\"blue\"}")?;
        check(
            "{\n  \"color\": \"green\",\n  \"version\": 3\n}\n",
            false,
            "{\"color\":\"green\",\"version\":3}",
        )
    }

    #[test]
    fn parsed_object_keeps_member_order() -> Result<(), String> {
        check(
            "{\"zeta\": 1, \"alpha\": 2, \"mid\": [true, null]}",
            false,
            "{\"zeta\":1,\"alpha\":2,\"mid\":[true,null]}",
        )
    }

    #[test]
    fn parsed_array_is_compacted() -> Result<(), String> {
        check(" [ 1, 2 ,3 ] ", false, "[1,2,3]")
    }

    #[test]
    fn parsed_scalars_render_their_value() -> Result<(), String> {
        check("\"blue\"", false, "blue")?;
        check("42", false, "42")?;
        check("2.5", false, "2.5")?;
        check("true", false, "true")?;
        check("null", false, "null")
    }

    #[test]
    fn raw_mode_keeps_text_verbatim() -> Result<(), String> {
        check("  {\"color\": \"blue\"}\n", true, "{\"color\": \"blue\"}")
    }

    #[test]
    fn raw_mode_uses_empty_placeholder() -> Result<(), String> {
        check("", true, EMPTY_BODY)?;
        check(" \n\t ", true, EMPTY_BODY)
    }

    #[test]
    fn non_json_falls_back_to_text() -> Result<(), String> {
        check("not json", false, "not json")?;
        check("  <html>ok</html>  ", false, "<html>ok</html>")
    }

    #[test]
    fn empty_non_json_uses_non_json_placeholder() -> Result<(), String> {
        check("", false, NON_JSON_BODY)?;
        check("   ", false, NON_JSON_BODY)
    }

    #[test]
    fn multi_line_text_is_flattened() -> Result<(), String> {
        check("line one\r\nline two\nthree", true, "line one line two three")?;
        check("\"a\\nb\"", false, "a b")
    }
}
