use crate::models::{AppData, Entity, Event, Training};
use crate::stats::{build_summary, fill_percent};

pub fn render_index(data: &AppData) -> String {
    let summary = build_summary(&data.events, &data.trainings);

    let events = if data.events.is_empty() {
        EMPTY_LIST.replace("{{TEXT}}", "لا توجد فعاليات حالياً")
    } else {
        data.events.iter().map(event_card).collect()
    };
    let trainings = if data.trainings.is_empty() {
        EMPTY_LIST.replace("{{TEXT}}", "لا توجد برامج تدريبية حالياً")
    } else {
        data.trainings.iter().map(training_card).collect()
    };

    INDEX_HTML
        .replace("{{TOTAL_EVENTS}}", &summary.total_events.to_string())
        .replace("{{ACTIVE_EVENTS}}", &summary.active_events.to_string())
        .replace("{{TOTAL_VOLUNTEERS}}", &summary.total_volunteers.to_string())
        .replace("{{TOTAL_TRAININGS}}", &summary.total_trainings.to_string())
        .replace("{{EVENTS}}", &events)
        .replace("{{TRAININGS}}", &trainings)
}

fn event_card(event: &Event) -> String {
    let details = format!(
        "<li>{} · {}</li><li>{}</li><li>القائد: {}</li>",
        event.date,
        escape(&event.time),
        escape(&event.location),
        escape(&event.leader)
    );
    card(
        event,
        &event.ministry,
        event.status.as_str(),
        &details,
        &event.image,
    )
}

fn training_card(training: &Training) -> String {
    let details = format!(
        "<li>{} · {}</li><li>{}</li><li>المدرب: {}</li><li>المدة: {}</li>",
        training.date,
        escape(&training.time),
        escape(&training.location),
        escape(&training.instructor),
        escape(&training.duration)
    );
    card(
        training,
        &training.ministry,
        training.level.label(),
        &details,
        &training.image,
    )
}

fn card(entity: &impl Entity, ministry: &str, badge: &str, details: &str, image: &str) -> String {
    // Missing images keep the empty placeholder block.
    let picture = if image.trim().is_empty() {
        r#"<div class="picture"></div>"#.to_string()
    } else {
        format!(
            r#"<div class="picture"><img src="{}" alt="{}" /></div>"#,
            escape(image),
            escape(entity.title())
        )
    };

    format!(
        r#"<article class="card">{picture}<div class="body"><span class="badge">{badge}</span><h3>{title}</h3><p class="ministry">{ministry}</p><ul>{details}</ul><div class="meter"><span style="width: {percent}%"></span></div><p class="count">{headcount} / {capacity}</p></div></article>"#,
        badge = escape(badge),
        title = escape(entity.title()),
        ministry = escape(ministry),
        percent = fill_percent(entity),
        headcount = entity.headcount(),
        capacity = entity.capacity(),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const EMPTY_LIST: &str = r#"<p class="empty">{{TEXT}}</p>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>بوابة التطوع</title>
  <style>
    :root {
      --bg-1: #eef4ff;
      --bg-2: #fdeeee;
      --ink: #1f2937;
      --accent: #2563eb;
      --accent-2: #dc2626;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 18px 40px rgba(31, 41, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Tajawal", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 32px;
    }

    h1 {
      margin: 0 0 6px;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 18px 20px;
    }

    .stat strong {
      display: block;
      font-size: 2rem;
      color: var(--accent);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      overflow: hidden;
    }

    .picture {
      height: 150px;
      background: #e5e7eb;
    }

    .picture img {
      width: 100%;
      height: 100%;
      object-fit: cover;
    }

    .body {
      padding: 16px 18px 20px;
    }

    .badge {
      font-size: 0.8rem;
      background: var(--bg-1);
      color: var(--accent);
      border-radius: 999px;
      padding: 2px 10px;
    }

    .ministry {
      color: var(--accent);
      margin: 0 0 8px;
      font-size: 0.9rem;
    }

    ul {
      list-style: none;
      padding: 0;
      margin: 0 0 12px;
      color: #4b5563;
      font-size: 0.9rem;
    }

    .meter {
      height: 8px;
      border-radius: 999px;
      background: #e5e7eb;
      overflow: hidden;
    }

    .meter span {
      display: block;
      height: 100%;
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
    }

    .count {
      margin: 6px 0 0;
      font-size: 0.85rem;
      color: #6b7280;
    }

    .empty {
      color: #6b7280;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>بوابة التطوع</h1>
      <p>الفعاليات الرياضية والبرامج التدريبية</p>
    </header>

    <section class="stats">
      <div class="stat"><strong>{{TOTAL_EVENTS}}</strong>إجمالي الفعاليات</div>
      <div class="stat"><strong>{{ACTIVE_EVENTS}}</strong>فعاليات نشطة</div>
      <div class="stat"><strong>{{TOTAL_VOLUNTEERS}}</strong>إجمالي المتطوعين</div>
      <div class="stat"><strong>{{TOTAL_TRAININGS}}</strong>برامج التدريب</div>
    </section>

    <section>
      <h2>الفعاليات</h2>
      <div class="grid">{{EVENTS}}</div>
    </section>

    <section>
      <h2>التدريب</h2>
      <div class="grid">{{TRAININGS}}</div>
    </section>
  </main>
</body>
</html>
"#;
