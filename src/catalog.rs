//! Curated simulation catalog and its search predicate.
//!
//! The catalog is a small static list checked before any AI generation is
//! attempted. Matching is deliberately loose: exact subject, then a
//! case-insensitive substring match in either direction between the query
//! and the topic keywords, or against the title.

/// One curated interactive simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub id: u32,
    pub subject: &'static str,
    /// Lowercase topic keywords used for matching.
    pub topics: &'static [&'static str],
    pub title: &'static str,
    pub platform: &'static str,
    pub url: &'static str,
    pub language: &'static str,
    /// Short usage guide shown next to the result.
    pub guide: &'static str,
    pub grades: &'static [&'static str],
}

/// Returns catalog entries matching the subject and topic query.
///
/// The query matches when any topic keyword contains it or is contained by
/// it, or when the title contains it.
pub fn search<'a>(
    catalog: &'a [Simulation],
    subject: &str,
    topic_query: &str,
) -> Vec<&'a Simulation> {
    let query = topic_query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|sim| {
            if sim.subject != subject {
                return false;
            }
            sim.topics
                .iter()
                .any(|t| t.contains(query.as_str()) || query.contains(t))
                || sim.title.to_lowercase().contains(query.as_str())
        })
        .collect()
}

/// The built-in catalog.
pub fn builtin() -> &'static [Simulation] {
    BUILTIN_CATALOG
}

const BUILTIN_CATALOG: &[Simulation] = &[
    Simulation {
        id: 1,
        subject: "Vật lý",
        topics: &["con lắc", "dao động", "chu kỳ"],
        title: "Con lắc đơn",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/pendulum-lab/latest/pendulum-lab_all.html",
        language: "vi",
        guide: "Kéo con lắc sang một bên và thả để quan sát dao động. Điều chỉnh chiều dài dây và khối lượng.",
        grades: &["Lớp 10", "Lớp 12"],
    },
    Simulation {
        id: 2,
        subject: "Vật lý",
        topics: &["ném xiên", "chuyển động ném", "quỹ đạo"],
        title: "Chuyển động của vật ném xiên",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/projectile-motion/latest/projectile-motion_all.html",
        language: "vi",
        guide: "Điều chỉnh góc ném và vận tốc ban đầu, quan sát quỹ đạo và tầm xa.",
        grades: &["Lớp 10"],
    },
    Simulation {
        id: 3,
        subject: "Vật lý",
        topics: &["mạch điện", "định luật ôm", "điện trở", "cường độ dòng điện"],
        title: "Bộ lắp ráp mạch điện một chiều",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/circuit-construction-kit-dc/latest/circuit-construction-kit-dc_all.html",
        language: "vi",
        guide: "Kéo thả pin, dây dẫn và bóng đèn để lắp mạch. Dùng ampe kế và vôn kế để đo.",
        grades: &["Lớp 7", "Lớp 9", "Lớp 11"],
    },
    Simulation {
        id: 4,
        subject: "Hóa học",
        topics: &["cân bằng phương trình", "phản ứng hóa học"],
        title: "Cân bằng phương trình hóa học",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/balancing-chemical-equations/latest/balancing-chemical-equations_all.html",
        language: "vi",
        guide: "Điều chỉnh hệ số để cân bằng số nguyên tử hai vế của phương trình.",
        grades: &["Lớp 8", "Lớp 9"],
    },
    Simulation {
        id: 5,
        subject: "Hóa học",
        topics: &["nồng độ", "dung dịch", "pha loãng"],
        title: "Nồng độ dung dịch",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/concentration/latest/concentration_all.html",
        language: "vi",
        guide: "Thêm chất tan hoặc nước để thay đổi nồng độ, quan sát màu dung dịch.",
        grades: &["Lớp 8", "Lớp 11"],
    },
    Simulation {
        id: 6,
        subject: "Sinh học",
        topics: &["chọn lọc tự nhiên", "tiến hóa", "đột biến"],
        title: "Chọn lọc tự nhiên",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/natural-selection/latest/natural-selection_all.html",
        language: "vi",
        guide: "Thay đổi môi trường và đột biến, quan sát quần thể thỏ qua các thế hệ.",
        grades: &["Lớp 9", "Lớp 12"],
    },
    Simulation {
        id: 7,
        subject: "Toán học",
        topics: &["phân số", "so sánh phân số"],
        title: "Ghép phân số",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/fraction-matcher/latest/fraction-matcher_all.html",
        language: "vi",
        guide: "Ghép các cặp phân số bằng nhau ở các dạng biểu diễn khác nhau.",
        grades: &["Lớp 4", "Lớp 5"],
    },
    Simulation {
        id: 8,
        subject: "Toán học",
        topics: &["đồ thị", "hàm số bậc hai", "parabol"],
        title: "Đồ thị hàm số bậc hai",
        platform: "PhET",
        url: "https://phet.colorado.edu/sims/html/graphing-quadratics/latest/graphing-quadratics_all.html",
        language: "vi",
        guide: "Kéo các hệ số a, b, c và quan sát parabol thay đổi theo thời gian thực.",
        grades: &["Lớp 9", "Lớp 10"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_must_match_exactly() {
        let results = search(builtin(), "Vật lý", "con lắc");
        assert!(!results.is_empty());
        assert!(results.iter().all(|s| s.subject == "Vật lý"));

        let results = search(builtin(), "Hóa học", "con lắc");
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_contained_in_keyword() {
        // "lắc" is a substring of the keyword "con lắc".
        let results = search(builtin(), "Vật lý", "lắc");
        assert_eq!(results[0].title, "Con lắc đơn");
    }

    #[test]
    fn test_keyword_contained_in_query() {
        // The keyword "con lắc" is a substring of the longer query.
        let results = search(builtin(), "Vật lý", "dao động của con lắc đơn");
        assert!(results.iter().any(|s| s.title == "Con lắc đơn"));
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let results = search(builtin(), "Toán học", "GHÉP PHÂN SỐ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 7);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let results = search(builtin(), "Vật lý", "lỗ đen siêu khối lượng");
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_is_trimmed() {
        let results = search(builtin(), "Hóa học", "  nồng độ  ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 5);
    }
}
