//! Fixed text used when assembling the user message for question generation.

/// Prefix for the title line.
pub const TITLE_LABEL: &str = "작품 제목: ";

/// Heading placed above the synopsis.
pub const OVERVIEW_LABEL: &str = "줄거리:";

/// Heading placed above the prior Q&A block.
pub const HISTORY_LABEL: &str = "이전 질문과 답변:";

/// Rendered in place of an empty answer.
pub const UNANSWERED_MARKER: &str = "(미답변)";

/// Appended after the history block.
pub const HISTORY_INSTRUCTION: &str = "위 질문들과 겹치지 않는 새로운 질문을 만들어 주세요. 답변이 있는 항목은 그 답변을 바탕으로 한 꼬리 질문으로 이어가도 좋습니다.";
