/*!

This is the long-form manual for `game_eligibility` and `gamepoll`.

## Selection rules

A game of the roster is put in the poll of a tournament when both hold:
* it has at least one setup available (`setup_amount > 0`)
* it was never played, or the tournament happens strictly after the end of the
  replay window that started on its last play

The replay window is `weeksBetweenReplay` whole weeks (604800 seconds each).
A game played on `01/05/24` with a window of 4 weeks is not eligible for a
tournament on `29/05/24`, and is eligible on `30/05/24`.

## Dates

All dates are written `dd/mm/yy`: two digits for the day, the month and the
year, separated by `/`. Any other layout is rejected.

Dates are converted to timestamps at midnight in the local time zone of the
machine running the tool. Two runs on machines in different time zones agree
on which games are eligible, since both dates of every comparison are
converted the same way, except around daylight saving changes.

An invalid tournament date stops the run. An invalid date in the play history
only drops that row.

## Input formats

### Roster

* `csv` a header row, then one row per game: `name,genre,setup amount`
* `xlsx` an Excel workbook with the same columns. The first worksheet is read
  unless `excelWorksheetName` is given.

### Play history

* `csv` a header row, then one row per play: `name,date`. The rows are applied
  in order, so the last one wins for a given game.

## Configuration

```json
{
  "rosterSource": {"provider": "csv", "filePath": "roster.csv"},
  "historySource": {"provider": "csv", "filePath": "history.csv"},
  "tournamentDate": "01/06/24",
  "weeksBetweenReplay": 4,
  "survey": {"pageIndex": 1}
}
```

The file paths are relative to the location of the configuration file.

*/
