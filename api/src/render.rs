use crate::chart;
use crate::error::AppError;
use crate::model::{PredictionRecord, ScoredPrediction};
use crate::session::SessionOutcome;
use crate::upload::UploadSummary;

const STYLE: &str = r#"
.title-style { font-size: 3em; font-weight: bold; color: #1A237E; text-align: center; margin-bottom: 10px; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
.subtitle-style { font-size: 1.4em; color: #37474F; text-align: center; margin-bottom: 20px; font-style: italic; }
.emoji-box { font-size: 1.2em; background-color: #E3F2FD; padding: 10px; border-radius: 10px; color: #0D47A1; }
.prediction-box { border: 2px solid #1E88E5; padding: 15px; border-radius: 15px; margin-bottom: 20px; background-color: #E1F5FE; }
.prediction-box h4 { color: #0D47A1; background-color: #BBDEFB; padding: 6px 10px; border-radius: 8px; display: inline-block; }
.breed-img { width: 100px; height: 100px; object-fit: cover; border-radius: 12px; margin-right: 15px; border: 2px solid #0D47A1; }
.prediction-row { display: flex; align-items: center; }
.info { background-color: #E3F2FD; padding: 12px; border-radius: 8px; }
.error { background-color: #FFEBEE; color: #B71C1C; padding: 12px; border-radius: 8px; }
button { background-color: #1E88E5; color: white; border: none; padding: 0.6em 1.5em; border-radius: 10px; font-weight: bold; transition: all 0.2s ease; }
button:hover { background-color: #0D47A1; transform: scale(1.05); }
main { max-width: 760px; margin: 0 auto; font-family: sans-serif; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #CFD8DC; padding: 4px 8px; text-align: left; }
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str, total_records: Option<i64>) -> String {
    let footer = match total_records {
        Some(total) => format!("🐾 {total} predictions logged so far. Made with ❤ in Rust, Dog Vision AI"),
        None => "🐾 Made with ❤ in Rust, Dog Vision AI".to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>🐾 AI Canine Vision | Smart Breed Classifier</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<div class="title-style">🐶 Welcome to PawPrint AI</div>
<div class="subtitle-style">Smart dog breed predictions powered by intelligent vision and trusted insights.</div>
{body}
<hr>
<div class="footer" style="text-align: center;">{footer}</div>
</main>
</body>
</html>"#
    )
}

fn upload_form() -> &'static str {
    r#"<form action="/predict" method="post" enctype="multipart/form-data">
<label for="image">📄 Upload a Dog Image</label>
<input id="image" name="image" type="file" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required>
<button type="submit">🔍 Predict Breed</button>
</form>"#
}

pub fn index_page() -> String {
    page(
        &format!(
            r#"{}<p class="info">👈 Upload a dog image above to get started.</p>"#,
            upload_form()
        ),
        None,
    )
}

// the failure is shown under the upload form
pub fn error_page(err: &AppError) -> String {
    page(
        &format!(
            r#"{}<p class="error">⚠️ {}</p>"#,
            upload_form(),
            escape(&err.to_string())
        ),
        None,
    )
}

pub fn result_page(outcome: &SessionOutcome) -> String {
    let mut body = String::from(upload_form());
    body.push_str(&uploaded_image(&outcome.upload));

    body.push_str("<h3>🎯 Top AI Predictions</h3>");
    for (i, prediction) in outcome.predictions.iter().enumerate() {
        body.push_str(&prediction_card(i + 1, prediction));
    }

    body.push_str("<h3>📊 Confidence Bar Chart</h3>");
    body.push_str(&chart::bar_svg(&chart::bars(&outcome.predictions)));

    body.push_str("<h3>🥧 Confidence Pie Chart</h3>");
    body.push_str(&chart::pie_svg(&chart::pie_slices(&outcome.predictions)));

    body.push_str("<h3>📓 All Prediction Records</h3>");
    body.push_str(&history_table(&outcome.history));

    page(&body, Some(outcome.total_records))
}

fn uploaded_image(upload: &UploadSummary) -> String {
    format!(
        r#"<figure><img src="{src}" alt="Uploaded image" style="max-width: 100%;"><figcaption>📷 Uploaded Image ({name}, {w}×{h})</figcaption></figure>"#,
        src = upload.preview_data_uri,
        name = escape(&upload.file_name),
        w = upload.width,
        h = upload.height,
    )
}

fn prediction_card(rank: usize, prediction: &ScoredPrediction) -> String {
    format!(
        r#"<div class="prediction-box">
<h4>⭐ Prediction {rank}</h4>
<div class="prediction-row">
<img src="{image}" class="breed-img" alt="{name}">
<div class="emoji-box">🐶 <strong>{name}</strong><br>📌 {description}<br>🔢 <span style="color:#0D47A1">Confidence: {percent:.2}%</span></div>
</div>
</div>"#,
        image = escape(&prediction.breed.image_ref),
        name = escape(&prediction.breed.name),
        description = escape(&prediction.breed.description),
        percent = prediction.percent(),
    )
}

fn history_table(records: &[PredictionRecord]) -> String {
    let rows: String = records
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.6}</td></tr>",
                escape(&record.timestamp),
                escape(&record.breed_name),
                record.confidence
            )
        })
        .collect();

    format!(
        "<table><thead><tr><th>timestamp</th><th>breed</th><th>confidence</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}
