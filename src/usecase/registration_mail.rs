use crate::domain::{
    models::{registration::NewRegistration, seminar::Seminar},
    services::email_service::EmailMessage,
};

const NOT_PROVIDED: &str = "（未記入）";

/// Notification to the organizer about a new registration
pub fn admin_notification(admin_email: &str, seminar: &Seminar, record: &NewRegistration) -> EmailMessage {
    let challenge = record.challenge.as_deref().unwrap_or(NOT_PROVIDED);

    let text = format!(
        "セミナー「{title}」に新しいお申し込みがありました。\n\n\
         会社名: {company}\n\
         お名前: {name}\n\
         役職: {position}\n\
         メールアドレス: {email}\n\
         電話番号: {phone}\n\
         現在の課題: {challenge}\n",
        title = seminar.title,
        company = record.company_name,
        name = record.name,
        position = record.position,
        email = record.email,
        phone = record.phone,
    );

    let rows = [
        ("会社名", record.company_name.as_str()),
        ("お名前", record.name.as_str()),
        ("役職", record.position.as_str()),
        ("メールアドレス", record.email.as_str()),
        ("電話番号", record.phone.as_str()),
        ("現在の課題", challenge),
    ]
    .iter()
    .map(|(label, value)| format!("<tr><th>{label}</th><td>{}</td></tr>", escape_html(value)))
    .collect::<String>();

    let html = format!(
        "<p>セミナー「{}」に新しいお申し込みがありました。</p><table>{rows}</table>",
        escape_html(seminar.title),
    );

    EmailMessage {
        to: admin_email.to_string(),
        subject: format!("【セミナー申込】{} {}様", record.company_name, record.name),
        text,
        html: Some(html),
    }
}

/// Confirmation sent to the person who registered
pub fn participant_confirmation(seminar: &Seminar, record: &NewRegistration) -> EmailMessage {
    let text = format!(
        "{company}\n{name} 様\n\n\
         この度はセミナー「{title}」にお申し込みいただき、誠にありがとうございます。\n\
         以下の内容でお申し込みを受け付けました。\n\n\
         日時: {date} {time}\n\
         開催形式: {format}\n\n\
         参加用URLは開催前日までにメールでお送りします。\n\
         当日お会いできることを楽しみにしております。\n",
        company = record.company_name,
        name = record.name,
        title = seminar.title,
        date = seminar.date,
        time = seminar.time,
        format = seminar.format,
    );

    let html = format!(
        "<p>{company}<br>{name} 様</p>\
         <p>この度はセミナー「{title}」にお申し込みいただき、誠にありがとうございます。<br>\
         以下の内容でお申し込みを受け付けました。</p>\
         <ul><li>日時: {date} {time}</li><li>開催形式: {format}</li></ul>\
         <p>参加用URLは開催前日までにメールでお送りします。<br>\
         当日お会いできることを楽しみにしております。</p>",
        company = escape_html(&record.company_name),
        name = escape_html(&record.name),
        title = escape_html(seminar.title),
        date = seminar.date,
        time = seminar.time,
        format = escape_html(seminar.format),
    );

    EmailMessage {
        to: record.email.clone(),
        subject: format!("【お申し込み完了】{}", seminar.title),
        text,
        html: Some(html),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
