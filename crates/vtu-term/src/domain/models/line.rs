use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub enum LineKind {
    Input,
    #[default]
    Output,
    Error,
    Success,
    Warning,
}

/// One entry of the append-only transcript.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default, Debug)]
pub struct TranscriptLine {
    pub text: String,
    pub kind: LineKind,
}

impl TranscriptLine {
    pub fn new(kind: LineKind, text: &str) -> TranscriptLine {
        return TranscriptLine {
            text: text.to_string().replace('\t', "  "),
            kind,
        };
    }

    pub fn input(text: &str) -> TranscriptLine {
        return TranscriptLine::new(LineKind::Input, text);
    }

    pub fn output(text: &str) -> TranscriptLine {
        return TranscriptLine::new(LineKind::Output, text);
    }

    pub fn error(text: &str) -> TranscriptLine {
        return TranscriptLine::new(LineKind::Error, text);
    }

    pub fn success(text: &str) -> TranscriptLine {
        return TranscriptLine::new(LineKind::Success, text);
    }

    pub fn warning(text: &str) -> TranscriptLine {
        return TranscriptLine::new(LineKind::Warning, text);
    }
}
