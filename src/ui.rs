use crate::view::{CHART_CONFIG, DashboardView, TableRow};

pub fn render_index(view: &DashboardView) -> Result<String, serde_json::Error> {
    let state_json = script_safe_json(&serde_json::to_string(view)?);
    let config_json = script_safe_json(&serde_json::to_string(&CHART_CONFIG)?);

    Ok(fill_template(
        INDEX_HTML,
        &[
            ("TABLE_ROWS", &render_table_rows(&view.table)),
            ("GOAL_TEXT", &escape_html(&view.goal.text)),
            ("GOAL_VALUE", &escape_html(&view.goal.input_value)),
            ("SUMMARY", &escape_html(&view.summary)),
            ("CHART_CONFIG", &config_json),
            ("STATE_JSON", &state_json),
        ],
    ))
}

// Single pass, so substituted user text is never scanned for placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 2))
        });
        match value {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &after[consumed..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn render_table_rows(rows: &[TableRow]) -> String {
    let mut html = String::new();
    for row in rows {
        match row {
            TableRow::Placeholder { message } => {
                html.push_str(&format!(
                    r#"<tr><td colspan="4" class="tiny-muted">{}</td></tr>"#,
                    escape_html(message)
                ));
            }
            TableRow::Workout {
                date,
                workout_type,
                duration,
                calories,
            } => {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(date),
                    escape_html(workout_type),
                    escape_html(duration),
                    escape_html(calories)
                ));
            }
        }
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

// JSON embedded in a <script> block must not be able to close it.
fn script_safe_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Tracker</title>
  <style>
    :root {
      --bg: #f3f6f4;
      --ink: #1f2a27;
      --muted: #73807b;
      --accent: #2f8f6b;
      --danger: #c63b2b;
      --card: #ffffff;
      --shadow: 0 18px 48px rgba(31, 42, 39, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    form.row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    input {
      border: 1px solid rgba(31, 42, 39, 0.18);
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.danger {
      background: var(--danger);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(31, 42, 39, 0.08);
    }

    .tiny-muted {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .goal-line {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: center;
      justify-content: space-between;
    }

    #calChart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-fill {
      fill: rgba(47, 143, 107, 0.15);
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(31, 42, 39, 0.1);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .status {
      min-height: 1.2em;
      color: var(--danger);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Fitness Tracker</h1>

    <section class="card">
      <h2>Log a workout</h2>
      <form id="workoutForm" class="row" method="post" action="/workouts">
        <label>Date <input type="date" name="date" required /></label>
        <label>Type <input type="text" name="type" placeholder="Run" required /></label>
        <label>Duration (min) <input type="number" name="duration" min="0" step="any" /></label>
        <label>Calories <input type="number" name="calories" min="0" step="any" /></label>
        <button type="submit">Add</button>
      </form>
      <div class="status" id="status"></div>
    </section>

    <section class="card">
      <div class="goal-line">
        <h2>Weekly goal: <span id="goalDisplay">{{GOAL_TEXT}}</span></h2>
        <span id="goalSummary" class="tiny-muted">{{SUMMARY}}</span>
      </div>
      <form id="goalForm" class="row" method="post" action="/goal">
        <label>Calories per week <input id="goalInput" type="number" name="goal" min="0" step="any" value="{{GOAL_VALUE}}" /></label>
        <button id="saveGoal" type="submit">Save goal</button>
      </form>
    </section>

    <section class="card">
      <h2>Last 14 days</h2>
      <svg id="calChart" viewBox="0 0 600 260" aria-label="Calories per day" role="img"></svg>
    </section>

    <section class="card">
      <div class="goal-line">
        <h2>History</h2>
        <form id="clearForm" method="post" action="/clear">
          <input type="hidden" name="confirm" value="" />
          <button id="clearAll" class="danger" type="submit">Clear all</button>
        </form>
      </div>
      <table id="logTable">
        <thead>
          <tr><th>Date</th><th>Type</th><th>Duration</th><th>Calories</th></tr>
        </thead>
        <tbody>{{TABLE_ROWS}}</tbody>
      </table>
    </section>
  </main>

  <script id="chartConfig" type="application/json">{{CHART_CONFIG}}</script>
  <script id="initialState" type="application/json">{{STATE_JSON}}</script>
  <script>
    const qs = (sel) => document.querySelector(sel);
    const form = qs('#workoutForm');
    const tbody = qs('#logTable tbody');
    const goalForm = qs('#goalForm');
    const goalInput = qs('#goalInput');
    const goalDisplay = qs('#goalDisplay');
    const goalSummary = qs('#goalSummary');
    const clearForm = qs('#clearForm');
    const statusEl = qs('#status');
    const chartConfig = JSON.parse(qs('#chartConfig').textContent);

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const drawLineChart = (svg, data, config) => {
      const width = 600;
      const height = 260;
      const paddingX = 48;
      const paddingY = 44;
      const top = 20;
      const labels = data.labels;
      const values = data.datasets[0].data;

      if (!labels.length) {
        svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const min = config.y_begin_at_zero ? Math.min(0, ...values) : Math.min(...values);
      let max = Math.max(...values);
      if (max === min) {
        max = min + 1;
      }
      const range = max - min;
      const xStep = labels.length > 1 ? (width - paddingX * 2) / (labels.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const path = values
        .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');
      const area = `${path} L ${x(values.length - 1).toFixed(2)} ${y(min).toFixed(2)} L ${x(0).toFixed(2)} ${y(min).toFixed(2)} Z`;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = labels.length > 8 ? 2 : 1;
      const xLabels = labels
        .map((label, index) => index % labelEvery !== 0
          ? ''
          : `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 16}" text-anchor="middle">${label}</text>`)
        .join('');
      const axisTitle = `<text class="chart-label" x="${width / 2}" y="${height - 6}" text-anchor="middle">${config.x_axis_title}</text>`;
      const circles = values
        .map((value, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(value)}" r="4"><title>${config.dataset_label}: ${value}</title></circle>`)
        .join('');

      svg.innerHTML = `
        ${grid}
        ${config.fill ? `<path class="chart-fill" d="${area}" />` : ''}
        <path class="chart-line" d="${path}" />
        ${circles}
        ${xLabels}
        ${axisTitle}
      `;
    };

    const createChart = (svg, config) => {
      const chart = {
        data: { labels: [], datasets: [{ label: config.dataset_label, data: [] }] },
        update() {
          drawLineChart(svg, chart.data, config);
        }
      };
      return chart;
    };

    const chart = createChart(qs('#calChart'), chartConfig);

    const renderTable = (rows) => {
      tbody.innerHTML = '';
      for (const row of rows) {
        const tr = document.createElement('tr');
        if (row.kind === 'placeholder') {
          const td = document.createElement('td');
          td.colSpan = 4;
          td.className = 'tiny-muted';
          td.textContent = row.message;
          tr.appendChild(td);
        } else {
          for (const value of [row.date, row.workout_type, row.duration, row.calories]) {
            const td = document.createElement('td');
            td.textContent = value;
            tr.appendChild(td);
          }
        }
        tbody.appendChild(tr);
      }
    };

    const renderAll = (view) => {
      renderTable(view.table);
      goalDisplay.textContent = view.goal.text;
      goalInput.value = view.goal.input_value;
      chart.data.labels = view.chart.labels;
      chart.data.datasets[0].data = view.chart.values;
      chart.update();
      goalSummary.textContent = view.summary;
    };

    const send = async (url, body) => {
      statusEl.textContent = '';
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      renderAll(await res.json());
    };

    const fail = (err) => {
      statusEl.textContent = err.message;
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      send('/api/workouts', {
        date: form.date.value,
        type: form.type.value.trim(),
        duration: form.duration.value,
        calories: form.calories.value
      })
        .then(() => form.reset())
        .catch(fail);
    });

    goalForm.addEventListener('submit', (event) => {
      event.preventDefault();
      send('/api/goal', { goal: goalInput.value }).catch(fail);
    });

    clearForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (confirm('Clear all workouts?')) {
        send('/api/clear', { confirm: true }).catch(fail);
      }
    });

    renderAll(JSON.parse(qs('#initialState').textContent));
  </script>
</body>
</html>
"#;
