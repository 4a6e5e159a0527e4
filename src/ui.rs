use crate::models::{Measure, TimeRange};

pub fn render_index(range: TimeRange, measure: Measure) -> String {
    INDEX_HTML
        .replace("{{RANGE}}", range.as_str())
        .replace("{{MEASURE}}", measure.as_str())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Growth Metrics Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f7fb;
      --bg-2: #cfe0f7;
      --ink: #1e293b;
      --users: #3b82f6;
      --sessions: #8b5cf6;
      --accent: var(--users);
      --muted: #64748b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(30, 41, 59, 0.14);
    }

    body[data-measure="sessions"] {
      --accent: var(--sessions);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef2ff 60%, #f8fafc 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(30, 41, 59, 0.07);
      border-radius: 999px;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-size: 0.85rem;
      font-weight: 600;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent);
      box-shadow: 0 8px 16px rgba(30, 41, 59, 0.12);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(30, 41, 59, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #94a3b8;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--ink);
    }

    .stat .value.up {
      color: #16a34a;
    }

    .stat .value.down {
      color: #dc2626;
    }

    .grid {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 20px;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(30, 41, 59, 0.08);
      display: grid;
      gap: 14px;
      align-content: start;
    }

    svg.chart {
      width: 100%;
      display: block;
    }

    svg.chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
      stroke-linecap: round;
    }

    .chart-area {
      fill: var(--accent);
      opacity: 0.12;
    }

    .chart-bar {
      fill: #e2e8f0;
    }

    .chart-bar.peak {
      fill: var(--sessions);
    }

    .chart-grid {
      stroke: rgba(30, 41, 59, 0.08);
    }

    .chart-label {
      fill: #94a3b8;
      font-size: 11px;
    }

    .insight {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px;
      border-radius: 14px;
      background: #f1f5f9;
    }

    .insight.peak {
      background: #eff6ff;
    }

    .insight .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .insight .date {
      font-weight: 600;
    }

    .insight .value {
      font-size: 1.3rem;
      font-weight: 600;
    }

    .badge {
      display: inline-block;
      padding: 4px 10px;
      border-radius: 999px;
      font-size: 0.75rem;
      font-weight: 600;
      text-transform: uppercase;
      background: #f1f5f9;
      color: #334155;
    }

    .badge.increasing {
      background: #dcfce7;
      color: #15803d;
    }

    .badge.decreasing {
      background: #fee2e2;
      color: #b91c1c;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 800px) {
      .app {
        padding: 28px 22px;
      }
      .grid {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body data-measure="{{MEASURE}}" data-range="{{RANGE}}">
  <main class="app">
    <header>
      <div>
        <h1>Growth Metrics</h1>
        <p class="subtitle">Synthetic daily users and sessions, summarized for the selected window.</p>
      </div>
      <div class="controls">
        <div class="tabs" role="tablist" id="measure-tabs">
          <button class="tab" type="button" data-measure="users">Users</button>
          <button class="tab" type="button" data-measure="sessions">Sessions</button>
        </div>
        <div class="tabs" role="tablist" id="range-tabs">
          <button class="tab" type="button" data-range="7d">7D</button>
          <button class="tab" type="button" data-range="30d">30D</button>
          <button class="tab" type="button" data-range="all">All</button>
        </div>
      </div>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label" id="latest-label">Today's Users</span>
        <span class="value" id="latest-value">--</span>
      </div>
      <div class="stat">
        <span class="label" id="contrast-label">Period Sessions</span>
        <span class="value" id="contrast-value">--</span>
      </div>
      <div class="stat">
        <span class="label" id="ratio-label">Engagement Ratio</span>
        <span class="value" id="ratio-value">--</span>
      </div>
      <div class="stat">
        <span class="label">Growth Trend</span>
        <span class="value" id="growth-value">--</span>
      </div>
    </section>

    <section class="card">
      <div>
        <h2 id="line-title">Users Momentum</h2>
        <p class="subtitle" id="line-subtitle">Daily trend for the selected window.</p>
      </div>
      <svg id="line-chart" class="chart" viewBox="0 0 700 300" aria-label="Active measure chart" role="img"></svg>
    </section>

    <section class="grid">
      <div class="card">
        <div>
          <h2>Session Distribution</h2>
          <p class="subtitle">Volume by individual day.</p>
        </div>
        <svg id="bar-chart" class="chart" viewBox="0 0 600 260" aria-label="Sessions chart" role="img"></svg>
      </div>
      <div class="card">
        <h2>Analytical Insights</h2>
        <div class="insight peak">
          <div>
            <div class="label">Peak</div>
            <div class="date" id="peak-date">--</div>
          </div>
          <div class="value" id="peak-value">--</div>
        </div>
        <div class="insight">
          <div>
            <div class="label">Lowest</div>
            <div class="date" id="trough-date">--</div>
          </div>
          <div class="value" id="trough-value">--</div>
        </div>
        <div>
          <span class="badge" id="trend-badge">flat</span>
          <p class="subtitle" id="trend-summary"></p>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const body = document.body;
    const statusEl = document.getElementById('status');
    const lineChartEl = document.getElementById('line-chart');
    const barChartEl = document.getElementById('bar-chart');
    const measureTabs = Array.from(document.querySelectorAll('#measure-tabs .tab'));
    const rangeTabs = Array.from(document.querySelectorAll('#range-tabs .tab'));
    const byId = (id) => document.getElementById(id);

    let measure = body.dataset.measure;
    let range = body.dataset.range;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatNumber = (value) => Number(value).toLocaleString();

    const formatAxisValue = (value) => {
      if (value >= 1000) {
        return `${Math.round(value / 100) / 10}k`;
      }
      return Math.round(value).toString();
    };

    const shortDate = (date) => date.slice(5);

    const axisGrid = (width, height, padX, padY, top, max) => {
      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = height - padY - (value / max) * (height - top - padY);
        grid += `<line class="chart-grid" x1="${padX}" y1="${yPos}" x2="${width - padX / 2}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${padX - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }
      return grid;
    };

    const renderLineChart = (points) => {
      const width = 700;
      const height = 300;
      const padX = 56;
      const padY = 34;
      const top = 20;

      const values = points.map((point) => point[measure]);
      const max = Math.max(1, ...values);
      const xStep = points.length > 1 ? (width - padX * 1.5) / (points.length - 1) : 0;
      const x = (index) => padX + index * xStep;
      const y = (value) => height - padY - (value / max) * (height - top - padY);

      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point[measure]).toFixed(2)}`)
        .join(' ');
      const area = `${path} L ${x(points.length - 1).toFixed(2)} ${height - padY} L ${padX} ${height - padY} Z`;

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - padY + 18}" text-anchor="middle">${shortDate(point.date)}</text>`;
        })
        .join('');

      const titles = points
        .map((point, index) => `<circle cx="${x(index)}" cy="${y(point[measure])}" r="6" fill="transparent"><title>${point.date}: ${formatNumber(point.users)} users, ${formatNumber(point.sessions)} sessions, ${point.sessions_per_user.toFixed(2)} S/U</title></circle>`)
        .join('');

      lineChartEl.innerHTML = `
        ${axisGrid(width, height, padX, padY, top, max)}
        <path class="chart-area" d="${area}" />
        <path class="chart-line" d="${path}" />
        ${titles}
        ${xLabels}
      `;
    };

    const renderBarChart = (points) => {
      const width = 600;
      const height = 260;
      const padX = 56;
      const padY = 34;
      const top = 16;

      const max = Math.max(1, ...points.map((point) => point.sessions));
      const peak = points.reduce((best, point) => (point.sessions > best.sessions ? point : best), points[0]);
      const band = (width - padX * 1.5) / points.length;
      const barWidth = Math.max(1, band * 0.7);
      const y = (value) => height - padY - (value / max) * (height - top - padY);

      const bars = points
        .map((point, index) => {
          const xPos = padX + index * band + (band - barWidth) / 2;
          const yPos = y(point.sessions);
          const cls = point === peak ? 'chart-bar peak' : 'chart-bar';
          return `<rect class="${cls}" x="${xPos.toFixed(2)}" y="${yPos.toFixed(2)}" width="${barWidth.toFixed(2)}" height="${(height - padY - yPos).toFixed(2)}" rx="3"><title>${point.date}: ${formatNumber(point.sessions)} sessions</title></rect>`;
        })
        .join('');

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${padX + index * band + band / 2}" y="${height - padY + 18}" text-anchor="middle">${shortDate(point.date)}</text>`;
        })
        .join('');

      barChartEl.innerHTML = `${axisGrid(width, height, padX, padY, top, max)}${bars}${xLabels}`;
    };

    const renderDashboard = (data) => {
      const { labels, stats, insights, points } = data;
      const title = data.measure.charAt(0).toUpperCase() + data.measure.slice(1);

      byId('latest-label').textContent = labels.latest;
      byId('latest-value').textContent = formatNumber(stats.latest_value);
      byId('contrast-label').textContent = labels.contrast_total;
      byId('contrast-value').textContent = formatNumber(stats.contrast_total);
      byId('ratio-label').textContent = labels.ratio;
      byId('ratio-value').textContent = `${stats.engagement_ratio.toFixed(2)} S/U`;

      const growthEl = byId('growth-value');
      const growth = stats.growth_rate_pct;
      growthEl.textContent = `${growth > 0 ? '+' : ''}${growth.toFixed(1)}%`;
      growthEl.className = `value ${growth > 0 ? 'up' : 'down'}`;

      byId('line-title').textContent = `${title} Momentum`;
      byId('line-subtitle').textContent = `Daily trend performance analyzed by ${data.range}.`;

      byId('peak-date').textContent = insights.peak_date;
      byId('peak-value').textContent = formatNumber(insights.peak_value);
      byId('trough-date').textContent = insights.trough_date;
      byId('trough-value').textContent = formatNumber(insights.trough_value);
      const badge = byId('trend-badge');
      badge.textContent = insights.trend;
      badge.className = `badge ${insights.trend}`;
      byId('trend-summary').textContent = insights.summary;

      renderLineChart(points);
      renderBarChart(points);
    };

    const syncTabs = () => {
      body.dataset.measure = measure;
      body.dataset.range = range;
      measureTabs.forEach((button) => button.classList.toggle('active', button.dataset.measure === measure));
      rangeTabs.forEach((button) => button.classList.toggle('active', button.dataset.range === range));
    };

    const load = async () => {
      syncTabs();
      const res = await fetch(`/api/dashboard?range=${encodeURIComponent(range)}&measure=${encodeURIComponent(measure)}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load dashboard');
      }
      renderDashboard(await res.json());
      setStatus('', '');
    };

    measureTabs.forEach((button) => {
      button.addEventListener('click', () => {
        measure = button.dataset.measure;
        load().catch((err) => setStatus(err.message, 'error'));
      });
    });

    rangeTabs.forEach((button) => {
      button.addEventListener('click', () => {
        range = button.dataset.range;
        load().catch((err) => setStatus(err.message, 'error'));
      });
    });

    load().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
