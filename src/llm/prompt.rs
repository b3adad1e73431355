//! Prompt construction.
//!
//! Pure and deterministic: identical requests always produce
//! byte-identical prompt text. The literals are the payload the model
//! sees, so they are fixed Traditional Chinese strings, not i18n keys.

use std::fmt::Write;

use crate::config::{PronounMode, StructureMode};
use crate::llm::{GenerationRequest, RewriteRequest};

/// Role framing put at the top of every generation prompt.
const PERSONA: &str = "你是一位具有教育學與兒童發展心理學背景的顧問專家，也是資深的國小導師，擅長以溫暖、具體且鼓勵性的語言撰寫學生成績單評語。";

/// Universal constraints appended to every generation prompt.
const NO_MARKDOWN: &str = "請直接輸出評語內容，不要有 markdown 標題或額外說明。";
const LANGUAGE: &str = "使用繁體中文（台灣）。";

/// Pronoun directive selected by the configured mode.
///
/// `Name` interpolates the student's name; the other three are fixed.
pub fn pronoun_directive(mode: PronounMode, student_name: &str) -> String {
    match mode {
        PronounMode::Name => format!(
            "請在評語中多使用學生姓名（{}）稱呼，減少代名詞。",
            student_name
        ),
        PronounMode::You => {
            "請使用第二人稱「你」來稱呼學生，語氣像是直接對學生說話。".to_string()
        }
        PronounMode::HeShe => "請使用第三人稱「他/她」稱呼學生。".to_string(),
        PronounMode::Student => "請使用「該生」或學生姓名稱呼。".to_string(),
    }
}

/// Structure directive selected by the configured mode.
pub fn structure_directive(mode: StructureMode) -> &'static str {
    match mode {
        StructureMode::Sandwich => {
            "請務必依照「優點肯定 -> 待改進之處 -> 未來期許與勉勵」的「三明治」結構撰寫。"
        }
        StructureMode::Points => "請以列點式結構呈現，分為「優點」、「表現」與「建議」等部分。",
        StructureMode::Free => "結構不拘，請自然流暢地撰寫。",
    }
}

/// Builds the single instruction block for a generation call.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{}", PERSONA);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "請為一位名叫 {} 的學生撰寫期末評語。", request.student_name);
    let _ = writeln!(prompt, "特質：{}。", request.traits.join(", "));
    if let Some(note) = request.note.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(
            prompt,
            "補充與具體事件紀錄：{} (請將此具體事件自然融入評語中)。",
            note
        );
    }
    let _ = writeln!(prompt, "風格：{}。", request.style);
    let _ = writeln!(prompt, "字數：約 {} 字。", request.word_count);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "寫作要求：");
    let _ = writeln!(
        prompt,
        "1. {}",
        pronoun_directive(request.pronoun_mode, &request.student_name)
    );
    let _ = writeln!(prompt, "2. {}", structure_directive(request.structure_mode));
    let _ = writeln!(prompt, "3. {}", NO_MARKDOWN);
    let _ = write!(prompt, "4. {}", LANGUAGE);
    prompt
}

/// Builds the two-part rewrite prompt: quoted original, then the edit
/// instruction, with the same output constraints.
pub fn build_rewrite_prompt(request: &RewriteRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "以下是一則學生的期末評語：");
    let _ = writeln!(prompt, "「{}」", request.original_comment);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "請根據以下指示重新撰寫或優化這則評語：");
    let _ = writeln!(prompt, "{}", request.instruction);
    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "請直接輸出優化後的評語內容，不要有 markdown 標題或額外說明，保持繁體中文（台灣）。"
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            student_name: "王小明".to_string(),
            traits: vec!["認真專注".to_string(), "樂於助人".to_string()],
            style: "溫馨".to_string(),
            word_count: 100,
            note: None,
            pronoun_mode: PronounMode::Student,
            structure_mode: StructureMode::Free,
        }
    }

    #[test]
    fn test_pronoun_directives_are_exact() {
        assert_eq!(
            pronoun_directive(PronounMode::Name, "王小明"),
            "請在評語中多使用學生姓名（王小明）稱呼，減少代名詞。"
        );
        assert_eq!(
            pronoun_directive(PronounMode::You, "王小明"),
            "請使用第二人稱「你」來稱呼學生，語氣像是直接對學生說話。"
        );
        assert_eq!(
            pronoun_directive(PronounMode::HeShe, "王小明"),
            "請使用第三人稱「他/她」稱呼學生。"
        );
        assert_eq!(
            pronoun_directive(PronounMode::Student, "王小明"),
            "請使用「該生」或學生姓名稱呼。"
        );
    }

    #[test]
    fn test_structure_directives_are_exact() {
        assert_eq!(
            structure_directive(StructureMode::Sandwich),
            "請務必依照「優點肯定 -> 待改進之處 -> 未來期許與勉勵」的「三明治」結構撰寫。"
        );
        assert_eq!(
            structure_directive(StructureMode::Points),
            "請以列點式結構呈現，分為「優點」、「表現」與「建議」等部分。"
        );
        assert_eq!(
            structure_directive(StructureMode::Free),
            "結構不拘，請自然流暢地撰寫。"
        );
    }

    #[test]
    fn test_prompt_contains_every_section_in_order() {
        let mut request = sample_request();
        request.note = Some("運動會帶領班級獲得接力第一名".to_string());
        let prompt = build_generation_prompt(&request);

        let positions: Vec<usize> = [
            "教育學與兒童發展心理學",
            "請為一位名叫 王小明 的學生撰寫期末評語。",
            "特質：認真專注, 樂於助人。",
            "補充與具體事件紀錄：運動會帶領班級獲得接力第一名",
            "風格：溫馨。",
            "字數：約 100 字。",
            "寫作要求：",
            "1. 請使用「該生」或學生姓名稱呼。",
            "2. 結構不拘，請自然流暢地撰寫。",
            "3. 請直接輸出評語內容",
            "4. 使用繁體中文（台灣）。",
        ]
        .iter()
        .map(|needle| prompt.find(needle).expect(needle))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "sections out of order");
    }

    #[test]
    fn test_note_section_omitted_when_absent() {
        let prompt = build_generation_prompt(&sample_request());
        assert!(!prompt.contains("補充與具體事件紀錄"));

        let mut request = sample_request();
        request.note = Some("   ".to_string());
        let prompt = build_generation_prompt(&request);
        assert!(!prompt.contains("補充與具體事件紀錄"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = sample_request();
        assert_eq!(
            build_generation_prompt(&request),
            build_generation_prompt(&request)
        );
    }

    #[test]
    fn test_rewrite_prompt_quotes_original_then_instruction() {
        let request = RewriteRequest {
            original_comment: "原本的評語".to_string(),
            instruction: "語氣再溫和一點".to_string(),
        };
        let prompt = build_rewrite_prompt(&request);
        let quoted = prompt.find("「原本的評語」").unwrap();
        let instruction = prompt.find("語氣再溫和一點").unwrap();
        assert!(quoted < instruction);
        assert!(prompt.contains("保持繁體中文（台灣）"));
        assert_eq!(build_rewrite_prompt(&request), prompt);
    }
}
