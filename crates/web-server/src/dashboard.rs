//! The dashboard page.
//!
//! A single self-contained HTML document with embedded CSS and JS — no build
//! step, no template engine. The page is static: all numbers come from the
//! JSON API at runtime, so the markup can live in the binary as a constant.

use axum::response::Html;

/// # GET /
pub async fn page() -> Html<&'static str> {
    Html(PAGE)
}

const PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Retail Analytics</title>
<style>
  :root { --accent: #2563eb; --ink: #111827; --muted: #6b7280; --line: #e5e7eb; }
  * { box-sizing: border-box; }
  body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: var(--ink); }
  header { background: #fff; border-bottom: 1px solid var(--line); padding: 0 24px; height: 56px;
           display: flex; align-items: center; gap: 12px; }
  header .mark { width: 28px; height: 28px; border-radius: 8px; background: var(--accent); color: #fff;
                 display: flex; align-items: center; justify-content: center; font-weight: 700; }
  header h1 { font-size: 18px; margin: 0; }
  main { max-width: 1100px; margin: 0 auto; padding: 24px; }
  .panel { background: #fff; border: 1px solid var(--line); border-radius: 12px; padding: 16px; margin-bottom: 24px; }
  .filters { display: flex; align-items: center; gap: 12px; }
  .filters label { color: var(--muted); font-size: 14px; }
  .filters select { padding: 6px 10px; border: 1px solid var(--line); border-radius: 8px; background: #f9fafb; }
  .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 16px; }
  .card { border: 1px solid var(--line); border-radius: 12px; padding: 12px 16px; }
  .card .label { color: var(--muted); font-size: 13px; }
  .card .value { font-size: 22px; font-weight: 700; margin-top: 4px; overflow-wrap: anywhere; }
  .charts { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
  @media (max-width: 800px) { .charts { grid-template-columns: 1fr; } }
  .panel h2 { font-size: 15px; margin: 0 0 12px; }
  svg text { font-size: 10px; fill: var(--muted); }
  .notice { color: var(--muted); font-size: 14px; padding: 24px 0; text-align: center; }
  .legend { font-size: 12px; color: var(--muted); margin-top: 8px; }
  .legend span { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin: 0 4px 0 12px; }
</style>
</head>
<body>
<header>
  <div class="mark">V</div>
  <h1>Retail Analytics</h1>
</header>
<main>
  <div class="panel filters">
    <label>Filters</label>
    <select id="year"><option value="All">All Years</option></select>
    <select id="month"><option value="All">All Months</option></select>
  </div>

  <div class="panel">
    <h2>Key Metrics</h2>
    <div class="cards" id="cards"></div>
  </div>

  <div class="charts">
    <div class="panel">
      <h2>Monthly Revenue</h2>
      <div id="revenue"></div>
    </div>
    <div class="panel">
      <h2>Retention &amp; Churn per Month</h2>
      <div id="retention"></div>
      <div class="legend">
        <span style="background:#2563eb"></span>Retention
        <span style="background:#dc2626"></span>Churn
      </div>
    </div>
  </div>
</main>
<script>
const fmtMoney = v => '$' + Number(v).toLocaleString(undefined, { maximumFractionDigits: 2 });
const fmtCount = v => Number(v).toLocaleString();

const CARDS = [
  ['Total Revenue', s => fmtMoney(s.revenue)],
  ['Total Orders', s => fmtCount(s.orders)],
  ['Total Customers', s => fmtCount(s.customers)],
  ['Top Product', s => s.top_product ?? 'N/A'],
  ['Average Order Value', s => fmtMoney(s.aov)],
  ['Customer Lifetime Value', s => fmtMoney(s.clv)],
];

function renderCards(stats) {
  document.getElementById('cards').innerHTML = CARDS.map(([label, pick]) =>
    `<div class="card"><div class="label">${label}</div><div class="value">${pick(stats)}</div></div>`
  ).join('');
}

// Minimal inline-SVG bar chart: one bar per month, scaled to max revenue.
function renderRevenue(points) {
  const el = document.getElementById('revenue');
  if (!points.length) {
    el.innerHTML = '<div class="notice">No revenue in the selected period.</div>';
    return;
  }
  const W = 480, H = 220, pad = 28;
  const max = Math.max(...points.map(p => Math.abs(Number(p.revenue)))) || 1;
  const bw = (W - pad * 2) / points.length;
  const bars = points.map((p, i) => {
    const h = Math.abs(Number(p.revenue)) / max * (H - pad * 2);
    const x = pad + i * bw;
    return `<rect x="${x + bw * 0.1}" y="${H - pad - h}" width="${bw * 0.8}" height="${h}" fill="#2563eb" rx="2"><title>${p.month}: ${fmtMoney(p.revenue)}</title></rect>`;
  }).join('');
  const step = Math.ceil(points.length / 8);
  const labels = points.filter((_, i) => i % step === 0).map((p, i) =>
    `<text x="${pad + points.indexOf(p) * bw + bw / 2}" y="${H - pad + 14}" text-anchor="middle">${p.month}</text>`
  ).join('');
  el.innerHTML = `<svg viewBox="0 0 ${W} ${H}" width="100%">${bars}${labels}</svg>`;
}

// Retention and churn as two polylines over the same month axis.
function renderRetention(points) {
  const el = document.getElementById('retention');
  if (points.length === 0) {
    el.innerHTML = '<div class="notice">Only one month of data &mdash; retention is not computable.</div>';
    return;
  }
  const W = 480, H = 220, pad = 28;
  const x = i => points.length === 1 ? W / 2 : pad + i * (W - pad * 2) / (points.length - 1);
  const y = v => H - pad - Number(v) * (H - pad * 2);
  const line = (pick, color) => {
    const coords = points.map((p, i) => `${x(i)},${y(pick(p))}`).join(' ');
    const dots = points.map((p, i) =>
      `<circle cx="${x(i)}" cy="${y(pick(p))}" r="3" fill="${color}"><title>${p.month}: ${(Number(pick(p)) * 100).toFixed(1)}%</title></circle>`).join('');
    return `<polyline points="${coords}" fill="none" stroke="${color}" stroke-width="2"/>${dots}`;
  };
  const step = Math.ceil(points.length / 8);
  const labels = points.filter((_, i) => i % step === 0).map(p =>
    `<text x="${x(points.indexOf(p))}" y="${H - pad + 14}" text-anchor="middle">${p.month}</text>`
  ).join('');
  el.innerHTML = `<svg viewBox="0 0 ${W} ${H}" width="100%">` +
    line(p => p.retention_rate, '#2563eb') + line(p => p.churn_rate, '#dc2626') + labels + '</svg>';
}

async function fetchJson(url) {
  const res = await fetch(url);
  if (!res.ok) throw new Error(`${url}: ${res.status}`);
  return res.json();
}

async function refresh() {
  const year = document.getElementById('year').value;
  const month = document.getElementById('month').value;
  const query = `?year=${year}&month=${month}`;
  const [stats, revenue] = await Promise.all([
    fetchJson(`/api/stats${query}`),
    fetchJson(`/api/revenue${query}`),
  ]);
  renderCards(stats);
  renderRevenue(revenue);
}

async function init() {
  const filters = await fetchJson('/api/filters');
  const yearSel = document.getElementById('year');
  const monthSel = document.getElementById('month');
  for (const y of filters.years) yearSel.add(new Option(y, y));
  for (const m of filters.months) monthSel.add(new Option(m, m));
  yearSel.onchange = refresh;
  monthSel.onchange = refresh;

  // Retention is unfiltered by design, so it is fetched exactly once.
  renderRetention(await fetchJson('/api/retention'));
  await refresh();
}

init().catch(err => {
  document.getElementById('cards').innerHTML = `<div class="notice">Failed to load: ${err.message}</div>`;
});
</script>
</body>
</html>
"##;
