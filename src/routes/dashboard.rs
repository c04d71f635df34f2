use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

use crate::common::AppState;

const POLL_INTERVAL_PLACEHOLDER: &str = "__POLL_INTERVAL_MS__";

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let html = DASHBOARD_HTML.replace(
        POLL_INTERVAL_PLACEHOLDER,
        &state.config.dashboard_poll_interval_ms.to_string(),
    );

    ([(header::CACHE_CONTROL, "public, max-age=60")], Html(html))
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>VIP027 Sensor Dashboard</title>
    <style>
        :root {
            --bg: #f8fafc;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #1e293b;
            --muted: #64748b;
            --accent: #2563eb;
            --on: #16a34a;
            --off: #dc2626;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }

        .container {
            max-width: 720px;
            margin: 0 auto;
            padding: 1.5rem;
        }

        header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 1.5rem;
        }
        h1 { font-size: 1.25rem; font-weight: 600; }
        .updated { font-size: 0.75rem; color: var(--muted); }

        .grid {
            display: grid;
            grid-template-columns: repeat(2, 1fr);
            gap: 0.75rem;
            margin-bottom: 1.5rem;
        }
        .card {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
        }
        .card .label { font-size: 0.75rem; color: var(--muted); text-transform: uppercase; letter-spacing: 0.04em; }
        .card .value { font-size: 1.5rem; font-weight: 600; margin-top: 0.25rem; }

        .control {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            display: flex;
            align-items: center;
            justify-content: space-between;
            gap: 1rem;
        }
        .led-indicator { font-weight: 600; }
        .led-indicator.on { color: var(--on); }
        .led-indicator.off { color: var(--off); }
        .buttons { display: flex; gap: 0.5rem; }
        button {
            padding: 0.5rem 1rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            font-size: 0.875rem;
            background: var(--surface);
            cursor: pointer;
            transition: all 0.15s;
        }
        button:hover { border-color: var(--accent); color: var(--accent); }
        button:disabled { opacity: 0.5; cursor: wait; }

        .error {
            margin-top: 1rem;
            color: var(--off);
            font-size: 0.875rem;
            min-height: 1.25rem;
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>VIP027 Sensor Dashboard</h1>
            <span class="updated" id="updated">waiting for data...</span>
        </header>

        <div class="grid">
            <div class="card"><div class="label">Ultrasonic</div><div class="value" id="ultrasonic">-</div></div>
            <div class="card"><div class="label">LED Ultrasonic</div><div class="value" id="led_ultrasonic">-</div></div>
            <div class="card"><div class="label">LDR</div><div class="value" id="ldr">-</div></div>
            <div class="card"><div class="label">LED LDR Pin</div><div class="value" id="led_ldr_pin">-</div></div>
        </div>

        <div class="control">
            <div>LED: <span class="led-indicator" id="led-status">-</span></div>
            <div class="buttons">
                <button id="led-on" type="button">Turn ON</button>
                <button id="led-off" type="button">Turn OFF</button>
            </div>
        </div>

        <div class="error" id="error"></div>
    </div>

    <script>
        const POLL_INTERVAL_MS = __POLL_INTERVAL_MS__;
        const FIELDS = ['ultrasonic', 'led_ultrasonic', 'ldr', 'led_ldr_pin'];

        function showError(message) {
            document.getElementById('error').textContent = message || '';
        }

        function renderLed(value) {
            const el = document.getElementById('led-status');
            el.textContent = value === 1 ? 'ON' : 'OFF';
            el.className = 'led-indicator ' + (value === 1 ? 'on' : 'off');
        }

        async function fetchJson(url, options) {
            const response = await fetch(url, options);
            const body = await response.json().catch(() => ({}));
            if (!response.ok) {
                throw new Error(body.error || ('HTTP ' + response.status));
            }
            return body;
        }

        async function poll() {
            try {
                const [snapshot, led] = await Promise.all([
                    fetchJson('/snapshot', { cache: 'no-store' }),
                    fetchJson('/actuator', { cache: 'no-store' }),
                ]);
                for (const field of FIELDS) {
                    document.getElementById(field).textContent = snapshot[field];
                }
                renderLed(led.led_status);
                document.getElementById('updated').textContent =
                    'record #' + snapshot.id + ' at ' + new Date(snapshot.recorded_at).toLocaleTimeString();
                showError('');
            } catch (err) {
                showError(err.message);
            }
        }

        async function setLed(value) {
            const buttons = document.querySelectorAll('.buttons button');
            buttons.forEach(b => b.disabled = true);
            try {
                const record = await fetchJson('/actuator', {
                    method: 'PUT',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ led_status: value }),
                });
                renderLed(record.led_status);
                showError('');
            } catch (err) {
                showError(err.message);
            } finally {
                buttons.forEach(b => b.disabled = false);
            }
        }

        document.getElementById('led-on').addEventListener('click', () => setLed(1));
        document.getElementById('led-off').addEventListener('click', () => setLed(0));

        poll();
        setInterval(poll, POLL_INTERVAL_MS);
    </script>
</body>
</html>
"##;
