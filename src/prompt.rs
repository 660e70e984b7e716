//! Prompt construction for both generation modes.
//!
//! `build_prompt` is a pure transformation from a [`GenerationRequest`] to a
//! [`PromptPayload`]: no I/O, no randomness, same request in, equal payload
//! out. Optional fields are substituted with explicit placeholder strings
//! rather than omitted, so the prompt structure the model sees is stable.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::GenerateError;
use crate::reference::ReferenceContent;
use crate::request::{GenerationMode, GenerationRequest};

/// System instruction for topic-only generation.
pub const SYSTEM_PROMPT_TOPIC: &str = "\
Bạn là chuyên gia lập trình web giáo dục và thiết kế bài giảng STEM.
Nhiệm vụ: Tạo nội dung giáo dục gồm 3 phần: Code HTML mô phỏng, Câu hỏi thực hành, Hướng dẫn sử dụng.
Output Format: Bắt buộc sử dụng các separator sau để phân chia nội dung:
|||HTML_START|||
[Code HTML tại đây]
|||HTML_END|||
|||QUESTIONS_START|||
[Câu hỏi thực hành tại đây]
|||QUESTIONS_END|||
|||GUIDE_START|||
[Hướng dẫn sử dụng tại đây]
|||GUIDE_END|||
";

/// System instruction for file-grounded generation. Same deliverables and
/// delimiters, but the model is told to read the attached material and infer
/// the scientific theme first.
pub const SYSTEM_PROMPT_FILES: &str = "\
Bạn là chuyên gia lập trình web giáo dục và thiết kế bài giảng STEM.
Nhiệm vụ: Đọc kỹ tài liệu và hình ảnh đính kèm, xác định chủ đề khoa học chính của tài liệu, sau đó tạo nội dung giáo dục gồm 3 phần: Code HTML mô phỏng minh họa đúng chủ đề đó, Câu hỏi thực hành, Hướng dẫn sử dụng.
Output Format: Bắt buộc sử dụng các separator sau để phân chia nội dung:
|||HTML_START|||
[Code HTML tại đây]
|||HTML_END|||
|||QUESTIONS_START|||
[Câu hỏi thực hành tại đây]
|||QUESTIONS_END|||
|||GUIDE_START|||
[Hướng dẫn sử dụng tại đây]
|||GUIDE_END|||
";

/// Placeholder substituted for absent adjustable parameters.
pub const PLACEHOLDER_PARAMETERS: &str = "Không xác định";
/// Placeholder substituted for an absent desired outcome.
pub const PLACEHOLDER_OUTCOME: &str = "Quan sát hiện tượng chung";
/// Placeholder substituted for an empty device list.
pub const PLACEHOLDER_DEVICES: &str = "Mặc định";

const TOPIC_INPUT_TEMPLATE: &str = "\
YÊU CẦU TẠO MÔ PHỎNG KHOA HỌC

I. THÔNG TIN ĐẦU VÀO:
Môn học: {{ subject }}
Chủ đề: {{ topic }}
Đối tượng: {{ grade }}
Thông số điều chỉnh: {{ parameters }}
Kết quả mong muốn: {{ outcome }}
Thiết bị: {{ devices }}
";

const FILES_INPUT_TEMPLATE: &str = "\
YÊU CẦU TẠO MÔ PHỎNG KHOA HỌC TỪ TÀI LIỆU

I. THÔNG TIN ĐẦU VÀO:
Môn học: {{ subject }}
Đối tượng: {{ grade }}
Thông số điều chỉnh: {{ parameters }}
Thiết bị: {{ devices }}

II. TÀI LIỆU THAM KHẢO:
{{ documents }}
";

/// Output requirements shared by both modes, appended verbatim after the
/// input section.
const OUTPUT_REQUIREMENTS: &str = "
II. YÊU CẦU OUTPUT:
A. CODE MÔ PHỎNG HTML/CSS/JS
Viết code hoàn chỉnh (Single File) với yêu cầu:
- Giao diện đơn giản, hiện đại, có tiêu đề và nút Reset.
- Sử dụng Canvas/SVG để vẽ.
- Slider/input/checkbox để điều chỉnh thông số đã nêu.
- Hiển thị giá trị real-time (số + hình ảnh).
- Tất cả nhãn bằng tiếng Việt.
- Chạy trên Chrome/Firefox/Edge (không cần plugin).
- Đảm bảo tính chính xác khoa học tương đối.

B. CÂU HỎI THỰC HÀNH (5-7 câu)
Theo cấu trúc:
- Câu 1-2: Quan sát hiện tượng (Cái gì thay đổi khi...?)
- Câu 3-4: Đo đạc và ghi chép (Điền bảng số liệu...)
- Câu 5-6: Phân tích mối quan hệ (Tỉ lệ thuận/nghịch...)
- Câu 7: Vận dụng thực tế

C. HƯỚNG DẪN SỬ DỤNG CHO GIÁO VIÊN
- Các bước mở và chạy mô phỏng
- Cách chia sẻ với học sinh
- Lưu ý kỹ thuật (internet, thiết bị...)

LƯU Ý QUAN TRỌNG: Hãy wrap các phần nội dung bằng các thẻ delimiter đã định nghĩa trong system prompt để hệ thống có thể tách biệt chúng.
";

/// Represents a part of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    /// Text content in the prompt.
    Text(String),
    /// Inline binary content with its media type (images).
    InlineData { media_type: String, data: Vec<u8> },
}

/// A complete request payload for one generation call: the system
/// instruction plus the ordered content parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub system_instruction: String,
    pub parts: Vec<PromptPart>,
}

/// Renders a prompt from a template string and a serializable context.
pub fn render_prompt<T: Serialize>(template: &str, ctx: T) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("prompt", template)?;
    let tmpl = env.get_template("prompt")?;
    tmpl.render(ctx)
}

/// Builds the full prompt payload for a request.
///
/// Topic-only mode produces a single text part; file-grounded mode produces
/// a leading text part (context fields plus every document's text labelled
/// with its display name) followed by one inline part per image, in
/// reference order.
pub fn build_prompt(request: &GenerationRequest) -> Result<PromptPayload, GenerateError> {
    match request.mode {
        GenerationMode::TopicOnly => build_topic_prompt(request),
        GenerationMode::FileGrounded => build_files_prompt(request),
    }
}

fn devices_line(request: &GenerationRequest) -> String {
    if request.available_devices.is_empty() {
        PLACEHOLDER_DEVICES.to_string()
    } else {
        request.available_devices.join(", ")
    }
}

fn build_topic_prompt(request: &GenerationRequest) -> Result<PromptPayload, GenerateError> {
    let input = render_prompt(
        TOPIC_INPUT_TEMPLATE,
        context! {
            subject => &request.subject,
            topic => &request.topic,
            grade => &request.target_audience,
            parameters => request
                .adjustable_parameters
                .as_deref()
                .unwrap_or(PLACEHOLDER_PARAMETERS),
            outcome => request
                .desired_outcome
                .as_deref()
                .unwrap_or(PLACEHOLDER_OUTCOME),
            devices => devices_line(request),
        },
    )
    .map_err(template_error)?;

    Ok(PromptPayload {
        system_instruction: SYSTEM_PROMPT_TOPIC.to_string(),
        parts: vec![PromptPart::Text(format!("{input}{OUTPUT_REQUIREMENTS}"))],
    })
}

fn build_files_prompt(request: &GenerationRequest) -> Result<PromptPayload, GenerateError> {
    let mut documents = String::new();
    for reference in &request.references {
        if let ReferenceContent::Document { text } = &reference.content {
            documents.push_str(&format!(
                "--- Tài liệu: {} ---\n{}\n",
                reference.display_name, text
            ));
        }
    }
    if documents.is_empty() {
        documents.push_str("(Chỉ có hình ảnh đính kèm)\n");
    }

    let input = render_prompt(
        FILES_INPUT_TEMPLATE,
        context! {
            subject => &request.subject,
            grade => &request.target_audience,
            parameters => request
                .adjustable_parameters
                .as_deref()
                .unwrap_or(PLACEHOLDER_PARAMETERS),
            devices => devices_line(request),
            documents => documents,
        },
    )
    .map_err(template_error)?;

    let mut parts = vec![PromptPart::Text(format!("{input}{OUTPUT_REQUIREMENTS}"))];
    for reference in &request.references {
        if let ReferenceContent::Image { media_type, data } = &reference.content {
            parts.push(PromptPart::InlineData {
                media_type: media_type.clone(),
                data: data.clone(),
            });
        }
    }

    Ok(PromptPayload {
        system_instruction: SYSTEM_PROMPT_FILES.to_string(),
        parts,
    })
}

fn template_error(err: minijinja::Error) -> GenerateError {
    GenerateError::GenerationFailed(format!("Prompt template error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;

    fn topic_request() -> GenerationRequest {
        GenerationRequest::from_topic("Vật lý", "Dao động của con lắc đơn", "Lớp 10")
            .with_adjustable_parameters("chiều dài dây, góc lệch")
            .with_desired_outcome("chu kỳ phụ thuộc chiều dài")
            .with_devices(vec!["Máy chiếu + Laptop".to_string(), "Có internet ổn định".to_string()])
    }

    #[test]
    fn test_topic_prompt_interpolation() {
        let payload = build_prompt(&topic_request()).unwrap();

        assert_eq!(payload.system_instruction, SYSTEM_PROMPT_TOPIC);
        assert_eq!(payload.parts.len(), 1);
        let PromptPart::Text(text) = &payload.parts[0] else {
            panic!("expected a single text part");
        };
        assert!(text.contains("Môn học: Vật lý"));
        assert!(text.contains("Chủ đề: Dao động của con lắc đơn"));
        assert!(text.contains("Đối tượng: Lớp 10"));
        assert!(text.contains("Thông số điều chỉnh: chiều dài dây, góc lệch"));
        assert!(text.contains("Thiết bị: Máy chiếu + Laptop, Có internet ổn định"));
        assert!(text.contains("LƯU Ý QUAN TRỌNG"));
    }

    #[test]
    fn test_topic_prompt_placeholders_for_absent_fields() {
        let request = GenerationRequest::from_topic("Hóa học", "Phản ứng trung hòa", "Lớp 9");
        let payload = build_prompt(&request).unwrap();
        let PromptPart::Text(text) = &payload.parts[0] else {
            panic!("expected a single text part");
        };
        assert!(text.contains(&format!("Thông số điều chỉnh: {PLACEHOLDER_PARAMETERS}")));
        assert!(text.contains(&format!("Kết quả mong muốn: {PLACEHOLDER_OUTCOME}")));
        assert!(text.contains(&format!("Thiết bị: {PLACEHOLDER_DEVICES}")));
    }

    #[test]
    fn test_build_is_deterministic() {
        let request = topic_request();
        assert_eq!(build_prompt(&request).unwrap(), build_prompt(&request).unwrap());
    }

    #[test]
    fn test_files_prompt_structure() {
        let request = GenerationRequest::from_references(
            "Vật lý",
            "Lớp 12",
            vec![
                Reference::document("giao-thoa.txt", "Hiện tượng giao thoa ánh sáng"),
                Reference::image("khe-young.png", "image/png", vec![1, 2, 3]),
                Reference::document("bai-tap.txt", "Bài tập vân sáng vân tối"),
                Reference::image("van-giao-thoa.jpg", "image/jpeg", vec![4, 5]),
            ],
        );

        let payload = build_prompt(&request).unwrap();
        assert_eq!(payload.system_instruction, SYSTEM_PROMPT_FILES);
        // One leading text part, then the two images in reference order.
        assert_eq!(payload.parts.len(), 3);

        let PromptPart::Text(text) = &payload.parts[0] else {
            panic!("first part must be text");
        };
        assert!(text.contains("--- Tài liệu: giao-thoa.txt ---"));
        assert!(text.contains("Hiện tượng giao thoa ánh sáng"));
        assert!(text.contains("--- Tài liệu: bai-tap.txt ---"));

        let PromptPart::InlineData { media_type, data } = &payload.parts[1] else {
            panic!("second part must be inline data");
        };
        assert_eq!(media_type, "image/png");
        assert_eq!(data, &[1, 2, 3]);

        let PromptPart::InlineData { media_type, .. } = &payload.parts[2] else {
            panic!("third part must be inline data");
        };
        assert_eq!(media_type, "image/jpeg");
    }

    #[test]
    fn test_files_prompt_images_only() {
        let request = GenerationRequest::from_references(
            "Sinh học",
            "Lớp 7",
            vec![Reference::image("te-bao.png", "image/png", vec![9])],
        );
        let payload = build_prompt(&request).unwrap();
        let PromptPart::Text(text) = &payload.parts[0] else {
            panic!("first part must be text");
        };
        assert!(text.contains("(Chỉ có hình ảnh đính kèm)"));
    }

    #[test]
    fn test_both_instructions_carry_delimiters() {
        for instruction in [SYSTEM_PROMPT_TOPIC, SYSTEM_PROMPT_FILES] {
            for marker in [
                "|||HTML_START|||",
                "|||HTML_END|||",
                "|||QUESTIONS_START|||",
                "|||QUESTIONS_END|||",
                "|||GUIDE_START|||",
                "|||GUIDE_END|||",
            ] {
                assert!(instruction.contains(marker), "missing {marker}");
            }
        }
    }
}
