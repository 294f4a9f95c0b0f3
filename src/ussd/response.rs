use serde::{Deserialize, Serialize};

/// Tells the gateway whether to keep prompting or close the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    Continue,
    End,
}

impl ResponseKind {
    pub fn marker(&self) -> &'static str {
        match self {
            ResponseKind::Continue => "CON",
            ResponseKind::End => "END",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UssdResponse {
    pub kind: ResponseKind,
    pub body: String,
}

impl UssdResponse {
    pub fn con(body: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Continue,
            body: body.into(),
        }
    }

    pub fn end(body: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::End,
            body: body.into(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == ResponseKind::End
    }
}

/// Wire form handed back to the gateway, e.g. `CON Main Menu (Gulu):...`
impl std::fmt::Display for UssdResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.marker(), self.body)
    }
}
