/// Fixed description of the webinar this service takes registrations for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seminar {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub format: &'static str,
}

pub const SEMINAR: Seminar = Seminar {
    title: "「商談時間」を最大化する",
    subtitle: "～煩雑な業務をAIで自動化し、顧客に向き合う～",
    date: "2026年3月3日(火)",
    time: "14:00～15:00",
    format: "オンライン（Google Meet）",
};
