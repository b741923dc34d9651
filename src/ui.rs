use crate::models::DATE_FORMAT;
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate) -> String {
    let today = today.format(DATE_FORMAT).to_string();
    INDEX_HTML.replace("{{TODAY}}", &today)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Terminal Occupancy Dashboard</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/daterangepicker/daterangepicker.css" />
  <style>
    :root {
      --bg: #f3f5f8;
      --ink: #1f2933;
      --muted: #66727f;
      --accent: #2f6fde;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 41, 51, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header h1 {
      margin: 0 0 6px;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
    }

    header p {
      margin: 0;
      color: var(--muted);
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .filters input {
      padding: 10px 12px;
      border: 1px solid #cfd6de;
      border-radius: 10px;
      font-size: 0.95rem;
      min-width: 220px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary {
      background: #dfe6ee;
      color: var(--ink);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(190px, 1fr));
      gap: 14px;
    }

    .stat {
      background: var(--card);
      border-radius: 16px;
      padding: 16px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.4rem;
      font-weight: 600;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(420px, 1fr));
      gap: 20px;
    }

    .chart-card {
      background: var(--card);
      border-radius: 18px;
      padding: 18px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 12px;
    }

    .chart-card header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.1rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Terminal Occupancy</h1>
      <p>Waiting area and customs area, refreshed every 5 seconds.</p>
    </header>

    <section class="filters">
      <input type="text" id="dateRangeFilter" value="{{TODAY}} - {{TODAY}}" />
      <input type="date" id="singleDateFilter" />
      <button class="applyButton">Apply Filter</button>
      <button class="resetButton secondary">Reset Filter</button>
    </section>

    <section class="stats">
      <div class="stat"><span class="label">Avg occupancy</span><span class="value" id="avgValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Peak occupancy</span><span class="value" id="peakValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Occupancy rate</span><span class="value" id="occupancyRateValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Turnover rate</span><span class="value" id="turnoverRateValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Avg wait time</span><span class="value" id="avgWaitTimeValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Customs avg occupancy</span><span class="value" id="avgCustomOccupancyValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Customs peak occupancy</span><span class="value" id="peakCustomOccupancyValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Customs flow rate</span><span class="value" id="avgCustomFlowRateValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Customs turnaround</span><span class="value" id="avgCustomPassengerTurnaroundTimeValue">No Data Yet</span></div>
      <div class="stat"><span class="label">Customs wait time</span><span class="value" id="avgCustomWaitTimeValue">No Data Yet</span></div>
    </section>

    <section class="charts">
      <article class="chart-card">
        <header>
          <h2>Waiting Area</h2>
          <button id="exportWaitingArea" class="secondary">Export CSV</button>
        </header>
        <canvas id="waitingAreaChart"></canvas>
      </article>
      <article class="chart-card">
        <header>
          <h2>Customs Area</h2>
          <button id="exportCustomsArea" class="secondary">Export CSV</button>
        </header>
        <canvas id="customsAreaChart"></canvas>
      </article>
    </section>
  </main>

  <script src="https://cdn.jsdelivr.net/npm/jquery@3/dist/jquery.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/moment@2/moment.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/daterangepicker/daterangepicker.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <script>
    const REFRESH_MS = 5000;
    const OVERLAY_ROLE = 'entrance_point';
    const HIDDEN_ROLES = ['total_seats', 'total_people'];
    const NO_DATA = 'No Data Yet';
    const FIELDS = [
      ['#avgValue', 'avg_occupancy_waiting', '%'],
      ['#peakValue', 'peak_occupancy_waiting', '%'],
      ['#occupancyRateValue', 'occupancy_rate_waiting', '%'],
      ['#turnoverRateValue', 'turnover_rate_waiting', '%'],
      ['#avgWaitTimeValue', 'avg_wait_time_waiting', ' min'],
      ['#avgCustomOccupancyValue', 'avg_occupancy_custom', '%'],
      ['#peakCustomOccupancyValue', 'peak_occupancy_custom', '%'],
      ['#avgCustomFlowRateValue', 'avg_flow_rate_custom', '/h'],
      ['#avgCustomPassengerTurnaroundTimeValue', 'avg_passenger_turnaround_time_custom', ' min'],
      ['#avgCustomWaitTimeValue', 'avg_wait_time_custom', ' min']
    ];
    const charts = {};

    const isValidPayload = (payload) =>
      payload && Array.isArray(payload.labels) && Array.isArray(payload.datasets) &&
      payload.datasets.every((d) => Array.isArray(d.data) && d.data.length === payload.labels.length);

    const toChartDataset = (dataset) => {
      const overlay = dataset.role === OVERLAY_ROLE;
      return {
        role: dataset.role,
        label: dataset.label,
        data: dataset.data,
        borderColor: dataset.borderColor,
        borderWidth: dataset.borderWidth,
        backgroundColor: dataset.backgroundColor,
        fill: dataset.fill,
        hidden: HIDDEN_ROLES.includes(dataset.role),
        type: overlay ? 'line' : undefined,
        order: overlay ? 0 : 1
      };
    };

    const initializeChart = (chartId, payload) => {
      if (!isValidPayload(payload)) {
        console.warn('Invalid chart payload for', chartId, payload);
        return null;
      }
      const stacked = chartId === 'waitingAreaChart';
      const ordered = payload.datasets
        .filter((d) => d.role !== OVERLAY_ROLE)
        .concat(payload.datasets.filter((d) => d.role === OVERLAY_ROLE));
      const ctx = document.getElementById(chartId).getContext('2d');
      return new Chart(ctx, {
        type: stacked ? 'bar' : 'line',
        data: { labels: payload.labels, datasets: ordered.map(toChartDataset) },
        options: {
          responsive: true,
          plugins: {
            title: {
              display: true,
              text: stacked ? 'Stacked Bar Chart - Waiting Area' : 'Line Chart - Customs Area'
            },
            legend: {
              onClick: (e, legendItem, legend) => {
                const chart = legend.chart;
                const index = legendItem.datasetIndex;
                const meta = chart.getDatasetMeta(index);
                meta.hidden = meta.hidden === null ? !chart.data.datasets[index].hidden : null;
                chart.update();
              }
            }
          },
          scales: { x: { stacked }, y: { stacked } },
          elements: { line: { tension: 0.4 } }
        }
      });
    };

    const fitToLabels = (data, length) =>
      data.length >= length
        ? data.slice(0, length)
        : data.concat(new Array(length - data.length).fill(0));

    const updateChart = (chartId, payload) => {
      const chart = charts[chartId];
      if (!chart) {
        charts[chartId] = initializeChart(chartId, payload);
        return;
      }
      if (!isValidPayload(payload)) {
        console.warn('Ignoring invalid chart update for', chartId, payload);
        return;
      }
      chart.data.labels = payload.labels;
      chart.data.datasets.forEach((dataset) => {
        const next = payload.datasets.find((d) => d.role === dataset.role);
        dataset.data = next ? next.data : fitToLabels(dataset.data, payload.labels.length);
      });
      chart.update();
    };

    const updateStatistics = (statistics) => {
      FIELDS.forEach(([selector, key, unit]) => {
        const value = statistics ? statistics[key] : undefined;
        $(selector).text(typeof value === 'number' ? `${value}${unit}` : NO_DATA);
      });
    };

    const picker = () => $('#dateRangeFilter').data('daterangepicker');

    const selectedRange = () => {
      const single = $('#singleDateFilter').val();
      if (single) {
        return { start_date: single, end_date: single };
      }
      return {
        start_date: picker().startDate.format('YYYY-MM-DD'),
        end_date: picker().endDate.format('YYYY-MM-DD')
      };
    };

    const refresh = () => {
      const range = selectedRange();
      $.ajax({ url: '/get_date_range', method: 'GET', data: range })
        .done((data) => {
          updateChart('waitingAreaChart', data.waiting_area);
          updateChart('customsAreaChart', data.customs_area);
        })
        .fail((error) => console.error('Error updating charts:', error));
      $.ajax({ url: '/get_statistics', method: 'GET', data: range })
        .done(updateStatistics)
        .fail((error) => console.error('Error fetching statistics:', error));
    };

    const loadInitialCharts = () => {
      [['/waiting_area_data', 'waitingAreaChart'], ['/customs_area_data', 'customsAreaChart']]
        .forEach(([url, chartId]) => {
          fetch(url)
            .then((res) => res.json())
            .then((payload) => {
              if (!charts[chartId]) {
                charts[chartId] = initializeChart(chartId, payload);
              }
            })
            .catch((error) => console.error('Error loading', chartId, error));
        });
    };

    const exportData = (area) => {
      const [startDate, endDate] = $('#dateRangeFilter').val().split(' - ');
      window.location.href = `/export_data_to_csv?start_date=${startDate}&end_date=${endDate}&area=${area}`;
    };

    $(() => {
      $('#dateRangeFilter').daterangepicker({ locale: { format: 'YYYY-MM-DD' } });

      $('#singleDateFilter').on('change', function () {
        $('#dateRangeFilter').prop('disabled', Boolean($(this).val()));
      });

      $('.applyButton').on('click', refresh);

      $('.resetButton').on('click', () => {
        picker().setStartDate(moment());
        picker().setEndDate(moment());
        $('#singleDateFilter').val('').prop('disabled', false);
        $('#dateRangeFilter').prop('disabled', false);
      });

      $('#exportWaitingArea').on('click', () => exportData('waiting_area'));
      $('#exportCustomsArea').on('click', () => exportData('customs_area'));

      loadInitialCharts();
      refresh();
      setInterval(refresh, REFRESH_MS);
    });
  </script>
</body>
</html>
"#;
