//! HTML report assembly: dark page shell, raw-data table, one Plotly block
//! per chart with its summary beneath, and a client-side PDF export control.
//!
//! The page template is kept as one literal and filled by string replacement;
//! we avoid `format!()` over it because the embedded JS is full of `{}`.

use crate::Result;
use crate::charts::{ChartBlock, Theme};
use crate::table::SurveyTable;

use regex::Regex;

/// Columns whose header matches this pattern are spreadsheet artifacts, not
/// survey questions, and are excluded from the raw-data table.
const UNNAMED_COLUMN_PATTERN: &str = r"^Unnamed";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Internet Connection Stability Analysis</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        body { background:#0b0f14; color:#e5e7eb; font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, Helvetica Neue, Arial, "Apple Color Emoji", "Segoe UI Emoji"; margin:0; padding:20px; }
        h1 { text-align:center; color:#e5e7eb; font-size:2.2em; margin:30px 0; }
        .toolbar { text-align:center; margin-bottom:10px; }
        .btn { background:#1f2937; color:#e5e7eb; border:1px solid #374151; border-radius:8px; padding:8px 16px; cursor:pointer; }
        .btn:hover { background:#283548; }
        .card { max-width:1200px; margin:24px auto; background:#0f1720; border:1px solid #1f2937; border-radius:12px; box-shadow: 0 2px 14px rgba(0,0,0,.35); }
        .card .inner { padding:20px; }
        .chart { margin:20px 0; }
        .chart-note { margin-top:8px; color:#9aa4b2; }
        .badge { display:inline-block; padding:2px 8px; border-radius:999px; background:#111827; color:#e5e7eb; font-size:12px; border:1px solid #1f2937; }
        .table-wrap { overflow-x:auto; max-height:480px; overflow-y:auto; }
        table { border-collapse: collapse; width: 100%; font-size: 14px; }
        thead th { position: sticky; top: 0; background: #111827; color: #e5e7eb; }
        th, td { border: 1px solid #1f2937; padding: 8px 10px; }
        tr:nth-child(even) { background: #0b1220; }
        /* A4 print tuning */
        @media print {
          html, body { width: 210mm; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
          .card { width: 190mm; margin: 0 auto 10mm; page-break-inside: avoid; break-inside: avoid; border-color:#243247; background:#0f1720; }
          .card + .card { page-break-before: always; break-before: page; }
          .card .inner { padding: 10mm; }
          .toolbar { display:none; }
        }
    </style>
</head>
<body>
    <h1>📊 Internet Connection Stability Analysis</h1>
    <div class="toolbar"><button id="downloadPdf" class="btn">Download PDF</button></div>
    <div class="card"><div class="inner">
      <div class="badge">Raw responses table</div>
      <div class="table-wrap">__TABLE__</div>
    </div></div>
    <div class="card"><div class="inner">
__CHARTS__
    </div></div>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/html2pdf.js/0.10.1/html2pdf.bundle.min.js"></script>
    <script>
      (function(){
        var btn = document.getElementById('downloadPdf');
        if(!btn) return;
        btn.addEventListener('click', function(){
          try {
            if (typeof html2pdf === 'undefined') {
              console.warn('html2pdf not loaded, using window.print fallback');
              return window.print();
            }
            // Resize plots for print so they fit A4 width.
            var plots = Array.prototype.slice.call(document.querySelectorAll('.js-plotly-plot'));
            var originals = [];
            plots.forEach(function(p){
              try {
                var layout = p.layout || {};
                originals.push({gd: p, w: layout.width, h: layout.height});
                Plotly.relayout(p, {width: 1050, height: 650});
              } catch(e) {}
            });
            var opt = {
              margin: [10,10,10,10],
              filename: 'Internet_Connection_Stability.pdf',
              image: { type: 'jpeg', quality: 0.98 },
              html2canvas: { scale: 2, useCORS: true, backgroundColor: '#0b0f14' },
              jsPDF: { unit: 'mm', format: 'a4', orientation: 'portrait' },
              pagebreak: { mode: ['css', 'legacy'], before: '.card' }
            };
            html2pdf().set(opt).from(document.body).save().then(function(){
              originals.forEach(function(o){ try{ Plotly.relayout(o.gd, {width:o.w, height:o.h}); }catch(e){} });
            });
          } catch(e) {
            console.error('PDF generation failed:', e);
            window.print();
          }
        });
      })();
    </script>
</body>
</html>
"#;

/// Render the whole report document.
pub fn render_report(blocks: &[ChartBlock], table: &SurveyTable, theme: &Theme) -> Result<String> {
    let table_html = render_table_html(table)?;

    let mut charts_html = String::new();
    for (idx, block) in blocks.iter().enumerate() {
        charts_html.push_str(&chart_block_html(idx, block, theme)?);
    }

    Ok(TEMPLATE
        .replace("__TABLE__", &table_html)
        .replace("__CHARTS__", &charts_html))
}

/// One chart card entry: the Plotly div, its inline `newPlot` call, and the
/// summary line beneath.
fn chart_block_html(idx: usize, block: &ChartBlock, theme: &Theme) -> Result<String> {
    let div_id = format!("chart_{}", idx);
    let traces = serde_json::to_string(&block.spec.traces_json(theme))?;
    let layout = serde_json::to_string(&block.spec.layout_json(theme))?;
    let summary = escape_html(&block.summary);

    Ok(format!(
        "<div class=\"chart\"><div id=\"{div_id}\"></div>\n\
         <script>Plotly.newPlot(\"{div_id}\", {traces}, {layout}, {{\"responsive\": true}});</script>\n\
         <div class=\"chart-note\">{summary}</div></div>\n"
    ))
}

/// Raw survey rows as an HTML table, excluding spreadsheet-artifact columns
/// and columns with no values at all.
fn render_table_html(table: &SurveyTable) -> Result<String> {
    let unnamed = Regex::new(UNNAMED_COLUMN_PATTERN)?;

    let keep: Vec<usize> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(i, h)| {
            !unnamed.is_match(h.as_str()) && table.rows().iter().any(|row| !row[*i].is_empty())
        })
        .map(|(i, _)| i)
        .collect();

    let mut out = String::from("<table><thead><tr>");
    for &i in &keep {
        out.push_str("<th>");
        out.push_str(&escape_html(&table.headers()[i]));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");

    for row in table.rows() {
        out.push_str("<tr>");
        for &i in &keep {
            out.push_str("<td>");
            out.push_str(&escape_html(&row[i]));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");

    Ok(out)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
