// JSONC Normalization
// Turns the lenient JSON used by VS Code theme files into strict JSON

/// Strip comments and trailing commas so `serde_json` accepts the document
pub fn to_strict_json(input: &str) -> String {
    strip_trailing_commas(&strip_jsonc_comments(input))
}

#[derive(Clone, Copy, PartialEq)]
enum Lexer {
    Code,
    Str { escaped: bool },
    LineComment,
    BlockComment { star: bool },
}

/// Remove `//` and `/* */` comments outside string literals, plus a leading BOM.
/// Newlines inside comments are kept.
pub fn strip_jsonc_comments(input: &str) -> String {
    let input = input.trim_start_matches('\u{FEFF}');
    let mut output = String::with_capacity(input.len());
    let mut state = Lexer::Code;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match state {
            Lexer::Code => match (ch, chars.peek().copied()) {
                ('/', Some('/')) => {
                    chars.next();
                    Lexer::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    Lexer::BlockComment { star: false }
                }
                _ => {
                    output.push(ch);
                    if ch == '"' {
                        Lexer::Str { escaped: false }
                    } else {
                        Lexer::Code
                    }
                }
            },
            Lexer::Str { escaped } => {
                output.push(ch);
                match ch {
                    _ if escaped => Lexer::Str { escaped: false },
                    '\\' => Lexer::Str { escaped: true },
                    '"' => Lexer::Code,
                    _ => Lexer::Str { escaped: false },
                }
            }
            Lexer::LineComment if ch == '\n' => {
                output.push(ch);
                Lexer::Code
            }
            Lexer::LineComment => Lexer::LineComment,
            Lexer::BlockComment { star } => {
                if star && ch == '/' {
                    Lexer::Code
                } else {
                    if ch == '\n' {
                        output.push(ch);
                    }
                    Lexer::BlockComment { star: ch == '*' }
                }
            }
        };
    }

    output
}

/// Drop commas that directly precede a closing `}` or `]`.
/// Expects comment-free input.
pub fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape = false;

    for (index, &ch) in chars.iter().enumerate() {
        if in_string {
            output.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars[index + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }

        output.push(ch);
    }

    output
}
