use crate::models::ClubSummary;

pub fn render_index(summary: &ClubSummary) -> String {
    let handicap = summary
        .average_handicap
        .map(|value| format!("{value:.1}"))
        .unwrap_or_else(|| "--".to_string());

    let cohort_rows: String = summary
        .cohort_distribution
        .iter()
        .map(|(cohort, count)| {
            format!("        <li><span class=\"label\">{cohort}기</span><span>{count}</span></li>\n")
        })
        .collect();

    INDEX_HTML
        .replace("{{TOTAL}}", &summary.total_members.to_string())
        .replace(
            "{{PARTICIPATING}}",
            &summary.participation.participating_members.to_string(),
        )
        .replace(
            "{{ROUNDS}}",
            &summary.participation.total_participations.to_string(),
        )
        .replace("{{HANDICAP}}", &handicap)
        .replace("{{COHORTS}}", &cohort_rows)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Club Stats</title>
  <style>
    :root {
      --bg: #f1f7f4;
      --ink: #1f2d2a;
      --accent: #10b981;
      --accent-2: #1e40af;
      --card: #ffffff;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Pretendard", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(760px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      color: var(--accent);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .label {
      font-size: 0.85rem;
      color: #6b7c77;
    }

    .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    li {
      display: flex;
      justify-content: space-between;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Club Stats</h1>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Members</span>
        <span id="total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Active members</span>
        <span id="participating" class="value">{{PARTICIPATING}}</span>
      </div>
      <div class="stat">
        <span class="label">Rounds played</span>
        <span id="rounds" class="value">{{ROUNDS}}</span>
      </div>
      <div class="stat">
        <span class="label">Average handicap</span>
        <span id="handicap" class="value">{{HANDICAP}}</span>
      </div>
    </section>

    <section class="stat">
      <span class="label">Members by cohort</span>
      <ul id="cohorts">
{{COHORTS}}      </ul>
    </section>
  </main>
</body>
</html>
"#;
